use std::fmt;
use std::str::FromStr;

use crate::error::OssError;

/// Canned access control list, as carried by the `x-oss-acl` header.
///
/// `Default` means "inherit from the bucket" and is only meaningful for objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CannedAcl {
    Default,
    Private,
    PublicRead,
    PublicReadWrite,
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CannedAcl::Default => write!(f, "default"),
            CannedAcl::Private => write!(f, "private"),
            CannedAcl::PublicRead => write!(f, "public-read"),
            CannedAcl::PublicReadWrite => write!(f, "public-read-write"),
        }
    }
}

impl FromStr for CannedAcl {
    type Err = OssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(CannedAcl::Default),
            "private" => Ok(CannedAcl::Private),
            "public-read" => Ok(CannedAcl::PublicRead),
            "public-read-write" => Ok(CannedAcl::PublicReadWrite),
            other => Err(OssError::validation(format!("unknown acl {:?}", other))),
        }
    }
}

impl CannedAcl {
    /// Collapse the permissions found in a grant list into a canned ACL.
    pub fn from_grants(read: bool, write: bool) -> CannedAcl {
        match (read, write) {
            (true, true) => CannedAcl::PublicReadWrite,
            (true, false) => CannedAcl::PublicRead,
            _ => CannedAcl::Private,
        }
    }

    pub fn from_permissions<'a, I>(permissions: I) -> CannedAcl
    where
        I: IntoIterator<Item = &'a str>,
    {
        let (mut read, mut write) = (false, false);
        for permission in permissions {
            match permission.trim() {
                "READ" => read = true,
                "WRITE" => write = true,
                _ => {}
            }
        }
        CannedAcl::from_grants(read, write)
    }

    /// Buckets have no parent to inherit from.
    pub fn valid_for_bucket(&self) -> bool {
        !matches!(self, CannedAcl::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse() {
        for acl in [
            CannedAcl::Default,
            CannedAcl::Private,
            CannedAcl::PublicRead,
            CannedAcl::PublicReadWrite,
        ] {
            assert_eq!(acl.to_string().parse::<CannedAcl>().unwrap(), acl);
        }
        assert_eq!(CannedAcl::PublicReadWrite.to_string(), "public-read-write");
        assert!("authenticated-read".parse::<CannedAcl>().is_err());
    }

    #[test]
    fn permissions_collapse() {
        assert_eq!(
            CannedAcl::from_permissions(["READ", "WRITE"]),
            CannedAcl::PublicReadWrite
        );
        assert_eq!(
            CannedAcl::from_permissions(["WRITE", "READ"]),
            CannedAcl::PublicReadWrite
        );
        assert_eq!(
            CannedAcl::from_permissions(["READ", "READ"]),
            CannedAcl::PublicRead
        );
        assert_eq!(CannedAcl::from_permissions(["WRITE"]), CannedAcl::Private);
        assert_eq!(
            CannedAcl::from_permissions(["FULL_CONTROL"]),
            CannedAcl::Private
        );
        assert_eq!(CannedAcl::from_permissions([]), CannedAcl::Private);
    }

    #[test]
    fn default_is_object_only() {
        assert!(!CannedAcl::Default.valid_for_bucket());
        assert!(CannedAcl::Private.valid_for_bucket());
    }
}
