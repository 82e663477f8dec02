//! Wire types for the Causeway backend
//!
//! The backend is spreadsheet-backed, so models stay loose: unknown fields
//! are ignored and most fields default when a row omits them. Ids are the
//! backend's numeric row ids. Input types know how to flatten themselves
//! into the form fields a write action sends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token pair issued at login and rotated on refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Minimal user projection cached for display; the server stays the
/// source of truth on every privileged call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_super_admin: Option<bool>,
}

/// Blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub cover_image: Option<String>,
    pub media: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields for creating or updating a post
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub cover_image: Option<String>,
    pub media: Vec<String>,
}

impl PostInput {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("title".to_string(), self.title.clone()),
            ("content".to_string(), self.content.clone()),
        ];
        push_opt(&mut params, "excerpt", self.excerpt.as_deref());
        push_opt(&mut params, "category", self.category.as_deref());
        push_opt(&mut params, "status", self.status.as_deref());
        push_opt(&mut params, "coverImage", self.cover_image.as_deref());
        if !self.media.is_empty() {
            // lists travel JSON-encoded inside a single form field
            params.push((
                "media".to_string(),
                serde_json::to_string(&self.media).unwrap_or_default(),
            ));
        }
        params
    }
}

/// Post category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Fields for creating or updating a category
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("name".to_string(), self.name.clone())];
        push_opt(&mut params, "description", self.description.as_deref());
        params
    }
}

/// Organizational award or recognition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Award {
    pub id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Fields for creating or updating an award
#[derive(Debug, Clone, Default)]
pub struct AwardInput {
    pub title: String,
    pub year: Option<i32>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl AwardInput {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("title".to_string(), self.title.clone())];
        if let Some(year) = self.year {
            params.push(("year".to_string(), year.to_string()));
        }
        push_opt(&mut params, "organization", self.organization.as_deref());
        push_opt(&mut params, "description", self.description.as_deref());
        push_opt(&mut params, "image", self.image.as_deref());
        params
    }
}

/// Published paper, report, or article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    pub id: i64,
    pub title: String,
    pub authors: Option<String>,
    pub year: Option<i32>,
    pub link: Option<String>,
    pub summary: Option<String>,
}

/// Fields for creating or updating a publication
#[derive(Debug, Clone, Default)]
pub struct PublicationInput {
    pub title: String,
    pub authors: Option<String>,
    pub year: Option<i32>,
    pub link: Option<String>,
    pub summary: Option<String>,
}

impl PublicationInput {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("title".to_string(), self.title.clone())];
        push_opt(&mut params, "authors", self.authors.as_deref());
        if let Some(year) = self.year {
            params.push(("year".to_string(), year.to_string()));
        }
        push_opt(&mut params, "link", self.link.as_deref());
        push_opt(&mut params, "summary", self.summary.as_deref());
        params
    }
}

/// Social media link shown in the site footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    pub id: i64,
    pub platform: String,
    pub url: String,
    pub display_order: Option<i32>,
}

/// Fields for creating or updating a social link
#[derive(Debug, Clone, Default)]
pub struct SocialLinkInput {
    pub platform: String,
    pub url: String,
    pub display_order: Option<i32>,
}

impl SocialLinkInput {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("platform".to_string(), self.platform.clone()),
            ("url".to_string(), self.url.clone()),
        ];
        if let Some(order) = self.display_order {
            params.push(("displayOrder".to_string(), order.to_string()));
        }
        params
    }
}

/// Organization profile shown on the public site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteProfile {
    pub name: Option<String>,
    pub mission: Option<String>,
    pub about: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
}

impl SiteProfile {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "name", self.name.as_deref());
        push_opt(&mut params, "mission", self.mission.as_deref());
        push_opt(&mut params, "about", self.about.as_deref());
        push_opt(&mut params, "email", self.email.as_deref());
        push_opt(&mut params, "phone", self.phone.as_deref());
        push_opt(&mut params, "address", self.address.as_deref());
        push_opt(&mut params, "logo", self.logo.as_deref());
        params
    }
}

/// Donation details for the donate page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DonateInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
}

/// Admin panel user account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub is_super_admin: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields for creating or updating a user account
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub email: String,
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_super_admin: Option<bool>,
}

impl UserInput {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("email".to_string(), self.email.clone())];
        push_opt(&mut params, "name", self.name.as_deref());
        push_opt(&mut params, "password", self.password.as_deref());
        if let Some(is_super_admin) = self.is_super_admin {
            params.push(("isSuperAdmin".to_string(), is_super_admin.to_string()));
        }
        params
    }
}

/// One site-wide search result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchHit {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub excerpt: Option<String>,
}

/// Answer to a `checkSuperAdmin` call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuperAdminStatus {
    pub is_super_admin: bool,
}

/// Location of an uploaded media file, regardless of which backend
/// produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

/// Filter parameters for listing posts
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PostFilter {
    /// Only published posts
    pub fn published() -> Self {
        Self {
            status: Some("published".to_string()),
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "status", self.status.as_deref());
        push_opt(&mut params, "category", self.category.as_deref());
        push_opt(&mut params, "search", self.search.as_deref());
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

fn push_opt(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_set_parses_login_payload() {
        let payload = json!({
            "token": "T1",
            "refreshToken": "R1",
            "expiresAt": "2026-08-07T12:00:00Z",
            "user": {"email": "admin@example.org"}
        });
        let tokens: TokenSet = serde_json::from_value(payload).unwrap();
        assert_eq!(tokens.token, "T1");
        assert_eq!(tokens.refresh_token.as_deref(), Some("R1"));
        assert_eq!(tokens.user.unwrap().email, "admin@example.org");
    }

    #[test]
    fn token_set_refresh_token_is_optional() {
        let payload = json!({"token": "T1", "expiresAt": "2026-08-07T12:00:00Z"});
        let tokens: TokenSet = serde_json::from_value(payload).unwrap();
        assert!(tokens.refresh_token.is_none());
        assert!(tokens.user.is_none());
    }

    #[test]
    fn post_tolerates_sparse_rows() {
        let post: Post = serde_json::from_value(json!({"id": 1, "title": "Hello"})).unwrap();
        assert_eq!(post.id, 1);
        assert!(post.media.is_empty());
        assert!(post.created_at.is_none());
    }

    #[test]
    fn post_input_flattens_to_form_fields() {
        let input = PostInput {
            title: "Annual report".to_string(),
            content: "<p>body</p>".to_string(),
            status: Some("published".to_string()),
            media: vec!["https://cdn/a.jpg".to_string()],
            ..PostInput::default()
        };
        let params = input.to_params();
        assert!(params.contains(&("title".to_string(), "Annual report".to_string())));
        assert!(params.contains(&("status".to_string(), "published".to_string())));
        assert!(
            params.contains(&("media".to_string(), r#"["https://cdn/a.jpg"]"#.to_string()))
        );
        assert!(!params.iter().any(|(k, _)| k == "excerpt"));
    }

    #[test]
    fn post_filter_skips_unset_fields() {
        let params = PostFilter::published().to_params();
        assert_eq!(params, vec![("status".to_string(), "published".to_string())]);
    }
}
