// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LinkedIn OAuth client.
//!
//! Resolves an authorization code into a profile:
//! - Code exchange for an access token
//! - Primary email address
//! - Localized first/last name and raw picture URN
//! - Display picture URL (best effort)

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

/// Profile data resolved from the identity provider.
///
/// Name and photo may be empty; the caller decides whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub email: String,
    /// "First Last"
    pub name: String,
    pub photo: String,
    /// LinkedIn does not share phone numbers, so this is always empty.
    pub phone: String,
}

/// Something that can turn an OAuth authorization code into a [`Profile`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve_profile(&self, auth_code: &str, redirect_uri: &str)
        -> Result<Profile, AppError>;
}

/// LinkedIn endpoint URLs.
#[derive(Debug, Clone)]
pub struct LinkedInEndpoints {
    pub token_url: String,
    pub email_url: String,
    pub profile_url: String,
    pub photo_url: String,
}

impl Default for LinkedInEndpoints {
    fn default() -> Self {
        Self {
            token_url: "https://www.linkedin.com/oauth/v2/accessToken".to_string(),
            email_url:
                "https://api.linkedin.com/v2/emailAddress?q=members&projection=(elements*(handle~))"
                    .to_string(),
            profile_url: "https://api.linkedin.com/v2/me".to_string(),
            photo_url: concat!(
                "https://api.linkedin.com/v2/me",
                "?projection=(id,profilePicture(displayImage~digitalmediaAsset:playableStreams))"
            )
            .to_string(),
        }
    }
}

/// LinkedIn API client.
#[derive(Clone)]
pub struct LinkedInClient {
    http: reqwest::Client,
    endpoints: LinkedInEndpoints,
    client_id: String,
    client_secret: String,
}

impl LinkedInClient {
    /// Create a new LinkedIn client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_endpoints(client_id, client_secret, LinkedInEndpoints::default())
    }

    pub fn with_endpoints(
        client_id: String,
        client_secret: String,
        endpoints: LinkedInEndpoints,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
            client_id,
            client_secret,
        }
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        auth_code: &str,
        redirect_uri: &str,
    ) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", auth_code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "LinkedIn token exchange rejected");
            return Err(AppError::UpstreamAuth(format!(
                "Token exchange returned HTTP {}",
                status
            )));
        }

        let token: AccessTokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Token JSON parse error: {}", e)))?;

        if token.access_token.is_empty() {
            return Err(AppError::UpstreamAuth(
                "Token response has empty access_token".to_string(),
            ));
        }

        tracing::debug!(expires_in = token.expires_in, "LinkedIn access token obtained");
        Ok(token.access_token)
    }

    /// Get the member's primary email address.
    pub async fn get_email(&self, access_token: &str) -> Result<String, AppError> {
        let payload: EmailResponse = self.get_json(&self.endpoints.email_url, access_token).await?;

        payload
            .elements
            .into_iter()
            .next()
            .map(|element| element.handle.email_address)
            .ok_or_else(|| AppError::UpstreamProfile("got empty email list".to_string()))
    }

    /// Get the member's localized name and raw picture URN.
    pub async fn get_name_and_picture(
        &self,
        access_token: &str,
    ) -> Result<NameAndPicture, AppError> {
        let payload: ProfileResponse = self
            .get_json(&self.endpoints.profile_url, access_token)
            .await?;

        Ok(NameAndPicture {
            first_name: payload.localized_first_name,
            last_name: payload.localized_last_name,
            picture: payload.profile_picture.display_image,
        })
    }

    /// Resolve the display picture URL, if LinkedIn returns one.
    pub async fn get_photo_url(&self, access_token: &str) -> Result<Option<String>, AppError> {
        let payload: PhotoResponse = self.get_json(&self.endpoints.photo_url, access_token).await?;
        Ok(best_photo_identifier(&payload).map(str::to_string))
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamProfile(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamProfile(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamProfile(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for LinkedInClient {
    async fn resolve_profile(
        &self,
        auth_code: &str,
        redirect_uri: &str,
    ) -> Result<Profile, AppError> {
        let access_token = self.exchange_code(auth_code, redirect_uri).await?;
        let email = self.get_email(&access_token).await?;
        let name = self.get_name_and_picture(&access_token).await?;

        let photo = match self.get_photo_url(&access_token).await {
            Ok(Some(url)) => url,
            Ok(None) => name.picture.clone(),
            Err(e) => {
                tracing::debug!(error = %e, "Could not resolve display picture, keeping raw URN");
                name.picture.clone()
            }
        };

        tracing::info!(email = %email, "LinkedIn profile resolved");

        Ok(Profile {
            email,
            name: full_name(&name.first_name, &name.last_name),
            photo,
            phone: String::new(),
        })
    }
}

/// Join first and last name, skipping empty parts.
pub fn full_name(first: &str, last: &str) -> String {
    [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// LinkedIn lists several renditions of the picture; the last is the largest.
fn best_photo_identifier(payload: &PhotoResponse) -> Option<&str> {
    payload
        .profile_picture
        .display_image
        .elements
        .first()?
        .identifiers
        .last()
        .map(|id| id.identifier.as_str())
        .filter(|id| !id.is_empty())
}

/// Name fields from `/v2/me`.
#[derive(Debug, Clone)]
pub struct NameAndPicture {
    pub first_name: String,
    pub last_name: String,
    /// Raw display image URN
    pub picture: String,
}

/// Token exchange response.
#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

#[derive(Debug, Default, Deserialize)]
struct EmailResponse {
    #[serde(default)]
    elements: Vec<EmailElement>,
}

#[derive(Debug, Default, Deserialize)]
struct EmailElement {
    #[serde(rename = "handle~", default)]
    handle: EmailHandle,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailHandle {
    #[serde(default)]
    email_address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProfileResponse {
    localized_first_name: String,
    localized_last_name: String,
    profile_picture: ProfilePicture,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProfilePicture {
    display_image: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PhotoResponse {
    profile_picture: PhotoPicture,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhotoPicture {
    #[serde(rename = "displayImage~")]
    display_image: DisplayImage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DisplayImage {
    elements: Vec<PhotoElement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhotoElement {
    identifiers: Vec<PhotoIdentifier>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhotoIdentifier {
    identifier: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> LinkedInClient {
        let base = server.url();
        LinkedInClient::with_endpoints(
            "client-id".to_string(),
            "client-secret".to_string(),
            LinkedInEndpoints {
                token_url: format!("{}/oauth/v2/accessToken", base),
                email_url: format!("{}/email", base),
                profile_url: format!("{}/me", base),
                photo_url: format!("{}/photo", base),
            },
        )
    }

    async fn mock_token(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("POST", "/oauth/v2/accessToken")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
                Matcher::UrlEncoded("client_id".into(), "client-id".into()),
                Matcher::UrlEncoded("client_secret".into(), "client-secret".into()),
                Matcher::UrlEncoded("redirect_uri".into(), "https://app/callback".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"tok","expires_in":5184000}"#)
            .create_async()
            .await
    }

    async fn mock_email(server: &mut mockito::Server, body: &str) -> mockito::Mock {
        server
            .mock("GET", "/email")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_me(server: &mut mockito::Server, body: &str) -> mockito::Mock {
        server
            .mock("GET", "/me")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    const EMAIL_BODY: &str = concat!(
        r#"{"elements":[{"handle":"urn:li:emailAddress:1","#,
        r#""handle~":{"emailAddress":"james@mi6.gov.uk"}}]}"#
    );
    const ME_BODY: &str = concat!(
        r#"{"localizedFirstName":"James","localizedLastName":"Bond","#,
        r#""profilePicture":{"displayImage":"urn:li:digitalmediaAsset:raw"}}"#
    );

    #[tokio::test]
    async fn resolves_profile_with_last_photo_identifier() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _email = mock_email(&mut server, EMAIL_BODY).await;
        let _me = mock_me(&mut server, ME_BODY).await;
        let _photo = server
            .mock("GET", "/photo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"profilePicture":{"displayImage~":{"elements":[{"identifiers":[
                    {"identifier":"https://media/100.jpg"},
                    {"identifier":"https://media/400.jpg"},
                    {"identifier":"https://media/800.jpg"}]}]}}}"#,
            )
            .create_async()
            .await;

        let profile = client_for(&server)
            .resolve_profile("auth-code", "https://app/callback")
            .await
            .unwrap();

        assert_eq!(
            profile,
            Profile {
                email: "james@mi6.gov.uk".to_string(),
                name: "James Bond".to_string(),
                photo: "https://media/800.jpg".to_string(),
                phone: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn photo_failure_keeps_raw_urn() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _email = mock_email(&mut server, EMAIL_BODY).await;
        let _me = mock_me(&mut server, ME_BODY).await;
        let _photo = server
            .mock("GET", "/photo")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let profile = client_for(&server)
            .resolve_profile("auth-code", "https://app/callback")
            .await
            .unwrap();

        assert_eq!(profile.photo, "urn:li:digitalmediaAsset:raw");
    }

    #[tokio::test]
    async fn empty_photo_list_keeps_raw_urn() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _email = mock_email(&mut server, EMAIL_BODY).await;
        let _me = mock_me(
            &mut server,
            r#"{"localizedFirstName":"Madonna","localizedLastName":""}"#,
        )
        .await;
        let _photo = server
            .mock("GET", "/photo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"profilePicture":{"displayImage~":{"elements":[]}}}"#)
            .create_async()
            .await;

        let profile = client_for(&server)
            .resolve_profile("auth-code", "https://app/callback")
            .await
            .unwrap();

        assert_eq!(profile.name, "Madonna");
        assert_eq!(profile.photo, "");
    }

    #[tokio::test]
    async fn rejected_code_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _token = server
            .mock("POST", "/oauth/v2/accessToken")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create_async()
            .await;
        let email = server.mock("GET", "/email").expect(0).create_async().await;

        let result = client_for(&server)
            .resolve_profile("auth-code", "https://app/callback")
            .await;

        assert!(matches!(result, Err(AppError::UpstreamAuth(_))));
        email.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_token_body_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _token = server
            .mock("POST", "/oauth/v2/accessToken")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let result = client_for(&server).exchange_code("auth-code", "https://app/callback").await;
        assert!(matches!(result, Err(AppError::UpstreamAuth(_))));
    }

    #[tokio::test]
    async fn empty_email_list_is_profile_error() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _email = mock_email(&mut server, r#"{"elements":[]}"#).await;
        let me = server.mock("GET", "/me").expect(0).create_async().await;

        let result = client_for(&server)
            .resolve_profile("auth-code", "https://app/callback")
            .await;

        assert!(matches!(result, Err(AppError::UpstreamProfile(_))));
        me.assert_async().await;
    }

    #[test]
    fn full_name_skips_empty_parts() {
        assert_eq!(full_name("James", "Bond"), "James Bond");
        assert_eq!(full_name("Madonna", ""), "Madonna");
        assert_eq!(full_name(" ", " "), "");
    }
}
