//! Upstream endpoint descriptors.
//!
//! A descriptor is the static definition of one upstream call: a unique
//! label (the aggregation key), the target URL, and the request shape.
//! Request bodies are endpoint-specific and opaque; they are passed
//! through to the upstream service verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Static definition of one upstream call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// Unique, human-readable label. Used as the aggregation key.
    pub label: String,

    /// Absolute URL of the upstream resource.
    pub url: String,

    /// HTTP method and optional body, tagged by method.
    #[serde(flatten)]
    pub request: UpstreamRequest,
}

/// Request shape for an upstream call, tagged by HTTP method.
///
/// `Get` carries no body; `Post` requires one (defaulting to an empty
/// object when omitted in config). New methods (PUT, PATCH) are added as
/// variants here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum UpstreamRequest {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post {
        #[serde(default = "empty_body")]
        body: Value,
    },
}

fn empty_body() -> Value {
    json!({})
}

impl UpstreamRequest {
    /// The body to serialize for non-GET methods, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            UpstreamRequest::Get => None,
            UpstreamRequest::Post { body } => Some(body),
        }
    }
}

fn moj_search(label: &str, resource: &str, body: Value) -> EndpointDescriptor {
    EndpointDescriptor {
        label: label.to_string(),
        url: format!(
            "https://hotichdientu.moj.gov.vn/v1/{resource}/search-approve-publish?page=0&size=10&sort=id,DESC"
        ),
        request: UpstreamRequest::Post { body },
    }
}

/// The built-in MOJ endpoint table.
///
/// Bodies mirror what the registry portal's own frontend sends, including
/// its fixed `lastUpdated` timestamps. Only the `totalElements` field of
/// the response is consumed, so `page=0&size=10` keeps result pages small.
pub fn default_descriptors() -> Vec<EndpointDescriptor> {
    vec![
        moj_search(
            "Đăng ký khai sinh",
            "birth",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "signStatus": null,
                "numberNo": "",
                "bookNoId": null,
                "rpGender": null,
                "rpBirthDate": "",
                "spFullName": "",
                "isApprove": true,
            }),
        ),
        moj_search(
            "Đăng ký khai tử",
            "death",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "bookNoId": null,
                "isApprove": true,
            }),
        ),
        moj_search(
            "Đăng ký kết hôn",
            "marriage",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "bookNoId": null,
                "isApprove": true,
            }),
        ),
        moj_search(
            "XNTT Hôn nhân",
            "marital",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "signStatus": null,
                "numberNo": "",
                "bookNoId": null,
                "rpGender": null,
                "rpBirthDate": "",
                "spFullName": "",
                "lastUpdated": 1762446099275u64,
                "isApprove": true,
            }),
        ),
        moj_search(
            "Đăng ký giám hộ",
            "guardianship",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "signStatus": null,
                "guardianBirthDate": null,
                "dependentBirthDate": null,
                "spFullName": "",
                "type": null,
                "isApprove": true,
            }),
        ),
        moj_search(
            "Đăng ký giám sát việc giám hộ",
            "guardianship-supervision",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "signStatus": null,
                "supervisorBirthDate": "",
                "numberNo": "",
                "type": null,
                "isApprove": true,
            }),
        ),
        moj_search(
            "Đăng ký nhận cha, mẹ, con",
            "parent-child",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "signStatus": null,
                "bookNoId": null,
                "childBirthDate": "",
                "parentBirthDate": "",
                "spFullName": "",
                "lastUpdated": 1762446648483u64,
                "isApprove": true,
            }),
        ),
        // The portal exposes no dedicated search for copy extracts; the
        // frontend queries the guardianship search for this card.
        moj_search(
            "Cấp bản sao trích lục",
            "guardianship",
            json!({
                "searchKey": "",
                "registrationDate": [],
                "signStatus": null,
                "guardianBirthDate": null,
                "dependentBirthDate": null,
                "spFullName": "",
                "type": null,
                "isApprove": true,
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_body_defaults_to_empty_object() {
        let descriptor: EndpointDescriptor = serde_json::from_value(json!({
            "label": "test",
            "url": "https://example.com/v1/search",
            "method": "POST",
        }))
        .unwrap();

        assert_eq!(descriptor.request.body(), Some(&json!({})));
    }

    #[test]
    fn get_carries_no_body() {
        let descriptor: EndpointDescriptor = serde_json::from_value(json!({
            "label": "test",
            "url": "https://example.com/v1/search",
            "method": "GET",
        }))
        .unwrap();

        assert!(descriptor.request.body().is_none());
    }

    #[test]
    fn descriptor_toml_round_trip() {
        let toml_src = r#"
            label = "Đăng ký khai sinh"
            url = "https://hotichdientu.moj.gov.vn/v1/birth/search-approve-publish"
            method = "POST"

            [body]
            searchKey = ""
            isApprove = true
        "#;

        let descriptor: EndpointDescriptor = toml::from_str(toml_src).unwrap();
        assert_eq!(descriptor.label, "Đăng ký khai sinh");
        assert_eq!(
            descriptor.request.body().unwrap()["isApprove"],
            Value::Bool(true)
        );
    }

    #[test]
    fn default_table_is_all_post() {
        for descriptor in default_descriptors() {
            assert!(
                matches!(descriptor.request, UpstreamRequest::Post { .. }),
                "{} should be a POST search",
                descriptor.label
            );
            assert!(descriptor.url.starts_with("https://hotichdientu.moj.gov.vn/"));
        }
    }
}
