//! Join URLs.
//!
//! A join is not fetched by this client: the signed URL is handed to the
//! user's browser, and BBB decides the role from the password it carries.

use reqwest::Url;

use bbb_core::constants::calls;
use bbb_core::error::BbbResult;

use crate::client::ApiClient;

impl ApiClient {
    /// Build a signed `join` URL with `redirect=true`.
    ///
    /// `extra_params` are appended after the standard ones.
    pub fn generate_join_url<I, K, V>(
        &self,
        meeting_id: &str,
        full_name: &str,
        password: &str,
        extra_params: I,
    ) -> BbbResult<Url>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params: Vec<(String, String)> = vec![
            ("meetingID".into(), meeting_id.into()),
            ("fullName".into(), full_name.into()),
            ("password".into(), password.into()),
            ("redirect".into(), "true".into()),
        ];
        params.extend(
            extra_params
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
        );

        self.build_signed_url(calls::JOIN, &params)
    }
}
