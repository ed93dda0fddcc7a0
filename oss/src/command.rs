use std::fmt;

use crate::acl::CannedAcl;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Delete,
    Get,
    Put,
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Head => write!(f, "HEAD"),
        }
    }
}

/// Which part of the resource path an operation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Service,
    Bucket,
    Object,
}

#[derive(Clone, Debug)]
pub enum Command<'a> {
    ListBuckets,
    CreateBucket {
        acl: CannedAcl,
    },
    DeleteBucket,
    BucketExists,
    GetBucketMeta,
    GetBucketAcl,
    PutBucketAcl {
        acl: CannedAcl,
    },
    GetObject,
    PutObject {
        content: &'a [u8],
        content_type: &'a str,
        acl: CannedAcl,
        content_md5: Option<String>,
        callback: Option<&'a str>,
        callback_var: Option<&'a str>,
    },
    DeleteObject,
    ObjectExists,
    GetObjectMeta,
    GetObjectAcl,
    PutObjectAcl {
        acl: CannedAcl,
    },
}

impl<'a> Command<'a> {
    pub fn http_verb(&self) -> HttpMethod {
        match *self {
            Command::ListBuckets
            | Command::BucketExists
            | Command::GetBucketMeta
            | Command::GetBucketAcl
            | Command::GetObject
            | Command::ObjectExists
            | Command::GetObjectAcl => HttpMethod::Get,
            Command::CreateBucket { .. }
            | Command::PutBucketAcl { .. }
            | Command::PutObject { .. }
            | Command::PutObjectAcl { .. } => HttpMethod::Put,
            Command::DeleteBucket | Command::DeleteObject => HttpMethod::Delete,
            Command::GetObjectMeta => HttpMethod::Head,
        }
    }

    pub fn scope(&self) -> Scope {
        match *self {
            Command::ListBuckets => Scope::Service,
            Command::CreateBucket { .. }
            | Command::DeleteBucket
            | Command::BucketExists
            | Command::GetBucketMeta
            | Command::GetBucketAcl
            | Command::PutBucketAcl { .. } => Scope::Bucket,
            Command::GetObject
            | Command::PutObject { .. }
            | Command::DeleteObject
            | Command::ObjectExists
            | Command::GetObjectMeta
            | Command::GetObjectAcl
            | Command::PutObjectAcl { .. } => Scope::Object,
        }
    }

    pub fn sub_resource(&self) -> Option<&'static str> {
        match *self {
            Command::GetBucketAcl
            | Command::PutBucketAcl { .. }
            | Command::GetObjectAcl
            | Command::PutObjectAcl { .. } => Some("acl"),
            _ => None,
        }
    }

    /// ACL sent in the `x-oss-acl` header and signed as an `x-amz-acl:` line.
    pub fn acl(&self) -> Option<CannedAcl> {
        match *self {
            Command::CreateBucket { acl }
            | Command::PutBucketAcl { acl }
            | Command::PutObjectAcl { acl }
            | Command::PutObject { acl, .. } => Some(acl),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &str {
        match self {
            Command::PutObject { content_type, .. } => *content_type,
            _ => "",
        }
    }

    pub fn content_md5(&self) -> Option<&str> {
        match self {
            Command::PutObject { content_md5, .. } => content_md5.as_deref(),
            _ => None,
        }
    }

    pub fn callback(&self) -> Option<(&'a str, Option<&'a str>)> {
        match *self {
            Command::PutObject {
                callback: Some(callback),
                callback_var,
                ..
            } => Some((callback, callback_var)),
            _ => None,
        }
    }

    pub fn content_length(&self) -> usize {
        match *self {
            Command::PutObject { content, .. } => content.len(),
            _ => 0,
        }
    }

    /// Operation name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match *self {
            Command::ListBuckets => "list_buckets",
            Command::CreateBucket { .. } => "create_bucket",
            Command::DeleteBucket => "delete_bucket",
            Command::BucketExists => "bucket_exists",
            Command::GetBucketMeta => "get_bucket_meta",
            Command::GetBucketAcl => "get_bucket_acl",
            Command::PutBucketAcl { .. } => "put_bucket_acl",
            Command::GetObject => "get_object",
            Command::PutObject { .. } => "put_object",
            Command::DeleteObject => "delete_object",
            Command::ObjectExists => "object_exists",
            Command::GetObjectMeta => "get_object_meta",
            Command::GetObjectAcl => "get_object_acl",
            Command::PutObjectAcl { .. } => "put_object_acl",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_object(callback: Option<&str>) -> Command<'_> {
        Command::PutObject {
            content: b"hello oss",
            content_type: "text/plain",
            acl: CannedAcl::Private,
            content_md5: Some("M3szwC+JSTAmhDmD/ycqMA==".to_string()),
            callback,
            callback_var: None,
        }
    }

    #[test]
    fn verbs() {
        assert_eq!(Command::ListBuckets.http_verb().to_string(), "GET");
        assert_eq!(Command::BucketExists.http_verb(), HttpMethod::Get);
        assert_eq!(Command::GetBucketMeta.http_verb(), HttpMethod::Get);
        assert_eq!(Command::ObjectExists.http_verb(), HttpMethod::Get);
        assert_eq!(Command::GetObjectMeta.http_verb().to_string(), "HEAD");
        assert_eq!(Command::DeleteObject.http_verb().to_string(), "DELETE");
        assert_eq!(put_object(None).http_verb().to_string(), "PUT");
        assert_eq!(
            Command::CreateBucket {
                acl: CannedAcl::Private
            }
            .http_verb(),
            HttpMethod::Put
        );
    }

    #[test]
    fn scopes_and_sub_resources() {
        assert_eq!(Command::ListBuckets.scope(), Scope::Service);
        assert_eq!(Command::GetBucketAcl.scope(), Scope::Bucket);
        assert_eq!(Command::GetObjectAcl.scope(), Scope::Object);

        assert_eq!(Command::GetBucketAcl.sub_resource(), Some("acl"));
        assert_eq!(
            Command::PutObjectAcl {
                acl: CannedAcl::Default
            }
            .sub_resource(),
            Some("acl")
        );
        assert_eq!(Command::GetBucketMeta.sub_resource(), None);
        assert_eq!(put_object(None).sub_resource(), None);
    }

    #[test]
    fn acl_line_only_for_acl_writers() {
        assert_eq!(
            Command::PutBucketAcl {
                acl: CannedAcl::PublicRead
            }
            .acl(),
            Some(CannedAcl::PublicRead)
        );
        assert_eq!(put_object(None).acl(), Some(CannedAcl::Private));
        assert_eq!(Command::GetObjectAcl.acl(), None);
        assert_eq!(Command::GetBucketAcl.acl(), None);
        assert_eq!(Command::DeleteBucket.acl(), None);
    }

    #[test]
    fn put_object_payload() {
        let command = put_object(Some("eyJjYWxsYmFja1VybCI6Imh0dHA6Ly9leGFtcGxlIn0="));
        assert_eq!(command.content_type(), "text/plain");
        assert_eq!(command.content_length(), 9);
        assert_eq!(command.content_md5(), Some("M3szwC+JSTAmhDmD/ycqMA=="));
        assert!(command.callback().is_some());
        assert!(put_object(None).callback().is_none());
        assert_eq!(Command::GetObject.content_type(), "");
    }
}
