//! Integration tests for SDL rendering

use aws_schema_composer::{AwsApi, ServiceComposer};
use aws_schema_composer_parser::AwsApiParser;
use aws_schema_composer_renderer::SdlRenderer;
use indexmap::IndexMap;
use std::fs;
use tempfile::TempDir;

const S3_API: &str = r#"{
    "version": "2.0",
    "metadata": {
        "apiVersion": "2006-03-01",
        "serviceFullName": "Amazon Simple Storage Service",
        "serviceId": "S3"
    },
    "operations": {
        "GetObject": {
            "name": "GetObject",
            "input": { "shape": "GetObjectRequest" },
            "output": { "shape": "GetObjectOutput" },
            "documentation": "Retrieves objects from Amazon S3."
        }
    },
    "shapes": {
        "GetObjectRequest": {
            "type": "structure",
            "required": ["Bucket", "Key"],
            "members": {
                "Bucket": { "shape": "BucketName" },
                "Key": { "shape": "ObjectKey" },
                "Range": { "shape": "Range" }
            }
        },
        "GetObjectOutput": {
            "type": "structure",
            "members": {
                "ContentLength": { "shape": "ContentLength" },
                "Metadata": { "shape": "Metadata" }
            }
        },
        "Metadata": {
            "type": "map",
            "key": { "shape": "ObjectKey" },
            "value": { "shape": "ObjectKey" }
        },
        "BucketName": { "type": "string" },
        "ObjectKey": { "type": "string" },
        "Range": { "type": "string" },
        "ContentLength": { "type": "long" }
    }
}"#;

const SQS_API: &str = r#"{
    "version": "2.0",
    "metadata": { "serviceFullName": "Amazon Simple Queue Service" },
    "operations": {
        "ListQueues": { "name": "ListQueues", "output": { "shape": "ListQueuesResult" } }
    },
    "shapes": {
        "ListQueuesResult": {
            "type": "structure",
            "members": { "QueueUrls": { "shape": "QueueUrlList" } }
        },
        "QueueUrlList": { "type": "list", "member": { "shape": "String" } },
        "String": { "type": "string" }
    }
}"#;

fn s3() -> ServiceComposer {
    let config = AwsApiParser::from_json(S3_API, "s3").unwrap().parse();
    ServiceComposer::new("s3", "Aws", config)
}

#[test]
fn test_render_service() {
    let composer = s3();
    let rendered = composer.get_rendered_type().unwrap();
    let sdl = SdlRenderer::new().unwrap().render(rendered).unwrap();

    assert!(sdl.starts_with("# Generated by aws-schema-composer"));
    assert!(sdl.contains("scalar JSON"));
    assert!(sdl.contains("\"\"\"\nAmazon Simple Storage Service\n\"\"\"\ntype AwsS3 {"));
    assert!(sdl.contains("  getObject(input: AwsS3GetObjectRequestInput!): AwsS3GetObjectOutput\n"));
    assert!(sdl.contains("  Retrieves objects from Amazon S3.\n"));
    assert!(sdl.contains("input AwsS3GetObjectRequestInput {"));
    assert!(sdl.contains("  Bucket: String!\n"));
    assert!(sdl.contains("  Range: String\n"));
    assert!(sdl.contains("type AwsS3GetObjectOutput {"));
    assert!(sdl.contains("  ContentLength: Float\n"));
    assert!(sdl.contains("  Metadata: JSON\n"));
}

#[test]
fn test_render_empty_service() {
    let config = AwsApiParser::from_json(r#"{ "operations": {}, "shapes": {} }"#, "s3")
        .unwrap()
        .parse();
    let composer = ServiceComposer::new("s3", "Aws", config);
    let sdl = SdlRenderer::new()
        .unwrap()
        .render(composer.get_rendered_type().unwrap())
        .unwrap();

    assert!(sdl.contains("type AwsS3\n"));
    assert!(!sdl.contains("input "));
}

#[test]
fn test_render_api_root() {
    let mut services = IndexMap::new();
    services.insert(
        "s3".to_string(),
        AwsApiParser::from_json(S3_API, "s3").unwrap().parse(),
    );
    services.insert(
        "sqs".to_string(),
        AwsApiParser::from_json(SQS_API, "sqs").unwrap().parse(),
    );
    let api = AwsApi::new("Aws", services);

    let sdl = SdlRenderer::new()
        .unwrap()
        .render(api.get_rendered_type().unwrap())
        .unwrap();

    assert!(sdl.contains("type Aws {"));
    assert!(sdl.contains("  s3: AwsS3!\n"));
    assert!(sdl.contains("  sqs: AwsSqs!\n"));
    assert!(sdl.contains("type AwsSqsListQueuesResult {\n  QueueUrls: [String]\n}"));
    assert_eq!(sdl.matches("scalar JSON").count(), 1);

    let root_at = sdl.find("type Aws {").unwrap();
    let s3_at = sdl.find("type AwsS3 {").unwrap();
    assert!(root_at < s3_at);
}

#[test]
fn test_render_to_directory() {
    let composer = s3();
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("schema");

    let path = SdlRenderer::new()
        .unwrap()
        .render_to_directory(composer.get_rendered_type().unwrap(), &output_dir)
        .unwrap();

    assert_eq!(path, output_dir.join("AwsS3.graphql"));
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("type AwsS3 {"));
}
