//! Public API surface: unauthenticated reads

use causeway_core::types::{
    Award, Category, DonateInfo, Post, PostFilter, Publication, SearchHit, SiteProfile,
    SocialLink,
};
use causeway_core::{Action, ApiResult};

use crate::client::Client;

/// Read-only surface for the public site
#[derive(Clone)]
pub struct PublicApi {
    client: Client,
}

impl PublicApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List posts, optionally filtered by status, category, or search
    pub async fn list_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>> {
        let envelope = self
            .client
            .execute_public(Action::ListPosts, &filter.to_params())
            .await?;
        envelope.into_data()
    }

    /// Fetch a single post by id
    pub async fn get_post(&self, id: i64) -> ApiResult<Post> {
        let params = vec![("id".to_string(), id.to_string())];
        let envelope = self.client.execute_public(Action::GetPost, &params).await?;
        envelope.into_data()
    }

    /// List post categories
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let envelope = self
            .client
            .execute_public(Action::ListCategories, &[])
            .await?;
        envelope.into_data()
    }

    /// List awards
    pub async fn list_awards(&self) -> ApiResult<Vec<Award>> {
        let envelope = self.client.execute_public(Action::ListAwards, &[]).await?;
        envelope.into_data()
    }

    /// List publications
    pub async fn list_publications(&self) -> ApiResult<Vec<Publication>> {
        let envelope = self
            .client
            .execute_public(Action::ListPublications, &[])
            .await?;
        envelope.into_data()
    }

    /// Fetch the organization profile
    pub async fn profile(&self) -> ApiResult<SiteProfile> {
        let envelope = self.client.execute_public(Action::GetProfile, &[]).await?;
        envelope.into_data()
    }

    /// List social links
    pub async fn social_links(&self) -> ApiResult<Vec<SocialLink>> {
        let envelope = self
            .client
            .execute_public(Action::GetSocialLinks, &[])
            .await?;
        envelope.into_data()
    }

    /// Site-wide search
    pub async fn search(&self, query: &str) -> ApiResult<Vec<SearchHit>> {
        let params = vec![("query".to_string(), query.to_string())];
        let envelope = self.client.execute_public(Action::Search, &params).await?;
        envelope.into_data()
    }

    /// Fetch donation details
    pub async fn donate_info(&self) -> ApiResult<DonateInfo> {
        let envelope = self
            .client
            .execute_public(Action::GetDonateInfo, &[])
            .await?;
        envelope.into_data()
    }
}
