extern crate oss;

use oss::{CannedAcl, Client, ClientConfig, OssError, PutOptions};

const MESSAGE: &str = "I want to go to OSS";

// Needs OSS_ENDPOINT plus OSS_ACCESS_KEY_ID / OSS_ACCESS_KEY_SECRET (or a
// ~/.oss/credentials profile) and an existing OSS_BUCKET.
pub fn main() -> Result<(), OssError> {
    let bucket = std::env::var("OSS_BUCKET").unwrap_or_else(|_| "rust-oss-test".to_string());
    let client = Client::new(ClientConfig::from_env()?);

    for info in client.list_buckets()? {
        println!("{} {:?}", info.name, info.location);
    }

    if !client.bucket_exists(&bucket)? {
        client.create_bucket(&bucket, None)?;
        println!("Created {}", bucket);
    }
    println!("Bucket ACL: {}", client.get_bucket_acl(&bucket)?);

    // Put a "test_file" with the contents of MESSAGE at the root of the bucket.
    let response = client.put_object(
        &bucket,
        "test_file",
        MESSAGE.as_bytes(),
        CannedAcl::Private,
        Some(PutOptions::default().with_content_type("text/plain").with_md5_check()),
    )?;
    assert_eq!(response.status_code(), Some(200));

    // Get it back and make sure the message survived.
    let body = client.get_object(&bucket, "test_file")?;
    assert_eq!(MESSAGE, String::from_utf8_lossy(body.as_slice()));

    let meta = client.get_object_meta(&bucket, "test_file")?;
    println!(
        "test_file: {:?} bytes, etag {:?}",
        meta.content_length(),
        meta.e_tag()
    );

    client.put_object_acl(&bucket, "test_file", CannedAcl::PublicRead)?;
    assert_eq!(
        client.get_object_acl(&bucket, "test_file")?,
        CannedAcl::PublicRead
    );

    // Random byte array
    let random_bytes: Vec<u8> = (0..3072).map(|_| 33).collect();
    client.put_object(
        &bucket,
        "random.bin",
        &random_bytes,
        CannedAcl::Default,
        None,
    )?;
    let body = client.get_object(&bucket, "random.bin")?;
    assert_eq!(body.as_slice(), random_bytes.as_slice());

    let result = client.delete_objects(&bucket, &["test_file", "random.bin"])?;
    println!(
        "Deleted {:?}, failed {:?}",
        result.succeeded_list, result.failed_list
    );

    println!(
        "Push to: {}",
        client.sign_push_stream_url(&bucket, "channel-1", None, None)?
    );

    Ok(())
}
