//! Configuration document model.
//!
//! Field names match the JSON produced by existing tooling and must not change.
//! Decoding is structurally permissive: unknown fields are ignored, and absent
//! or `null` fields fall back to empty strings, empty arrays or empty objects.

use serde::{Deserialize, Deserializer, Serialize};

/// Full configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_default")]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apps: Vec<App>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    #[serde(rename = "appName", default, deserialize_with = "null_as_default")]
    pub app_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environments: Vec<Environment>,
}

/// Deployment parameters of one environment of an app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "awsAccountId", default, deserialize_with = "null_as_default")]
    pub aws_account_id: String,
    #[serde(rename = "iamRoles", default, deserialize_with = "null_as_default")]
    pub iam_roles: Vec<IamRole>,
    #[serde(
        rename = "terraformBackend",
        default,
        deserialize_with = "null_as_default"
    )]
    pub terraform_backend: TerraformBackend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IamRole {
    #[serde(rename = "roleName", default, deserialize_with = "null_as_default")]
    pub role_name: String,
    #[serde(rename = "policyArn", default, deserialize_with = "null_as_default")]
    pub policy_arn: String,
}

/// Only the S3 backend kind is modeled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerraformBackend {
    #[serde(default, deserialize_with = "null_as_default")]
    pub s3: S3Backend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Backend {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bucket: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
}

/// Entity counts of a document, used for startup logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub repositories: usize,
    pub apps: usize,
    pub environments: usize,
}

impl Document {
    pub fn summary(&self) -> DocumentSummary {
        let mut summary = DocumentSummary {
            repositories: self.repositories.len(),
            ..Default::default()
        };
        for repo in &self.repositories {
            summary.apps += repo.apps.len();
            summary.environments += repo.apps.iter().map(|a| a.environments.len()).sum::<usize>();
        }
        summary
    }

    /// Paths of siblings that repeat an earlier sibling's name.
    ///
    /// Lookups are first-match-wins, so these entries (and everything below
    /// them) can never be returned by a path lookup. Children of a shadowed
    /// entry are not reported separately.
    pub fn shadowed_paths(&self) -> Vec<String> {
        let mut out = Vec::new();

        for (i, repo) in self.repositories.iter().enumerate() {
            if self.repositories[..i].iter().any(|r| r.name == repo.name) {
                out.push(repo.name.clone());
                continue;
            }
            for (j, app) in repo.apps.iter().enumerate() {
                if repo.apps[..j].iter().any(|a| a.app_name == app.app_name) {
                    out.push(format!("{}/{}", repo.name, app.app_name));
                    continue;
                }
                for (k, env) in app.environments.iter().enumerate() {
                    if app.environments[..k].iter().any(|e| e.name == env.name) {
                        out.push(format!("{}/{}/{}", repo.name, app.app_name, env.name));
                    }
                }
            }
        }

        out
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
