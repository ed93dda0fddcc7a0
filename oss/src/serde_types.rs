/// Owner of a bucket or of an ACL
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "DisplayName", default)]
    pub display_name: Option<String>,
}

/// `GET /` response
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListAllMyBucketsResult {
    #[serde(rename = "Owner", default)]
    pub owner: Option<Owner>,
    #[serde(rename = "Buckets")]
    pub buckets: Buckets,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Buckets {
    #[serde(rename = "Bucket", default)]
    pub bucket: Vec<BucketInfo>,
}

/// An individual bucket in a `ListAllMyBucketsResult`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "CreationDate", default)]
    pub creation_date: Option<String>,
}

/// `GET ?acl` response
#[derive(Deserialize, Debug, Clone)]
pub struct AccessControlPolicy {
    #[serde(rename = "Owner", default)]
    pub owner: Option<Owner>,
    #[serde(rename = "AccessControlList")]
    pub access_control_list: AccessControlList,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AccessControlList {
    #[serde(rename = "Grant", default)]
    pub grants: Vec<Grant>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Grant {
    #[serde(rename = "Grantee", default)]
    pub grantee: Option<Grantee>,
    #[serde(rename = "Permission")]
    pub permission: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Grantee {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
    #[serde(rename = "DisplayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "URI", default)]
    pub uri: Option<String>,
}

/// Error body of a non-2xx response
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorResponse {
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
    #[serde(rename = "HostId", default)]
    pub host_id: Option<String>,
}
