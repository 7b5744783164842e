use crate::artifacts::branch::{DEFAULT_BRANCH, INVALID_BRANCH_NAME_REGEX};
use crate::errors::RepositoryError;
use anyhow::Context;
use derive_new::new;

const REF_PREFIX: &str = "refs/heads/";

/// Full name of a branch ref, as written into `HEAD` (e.g. `refs/heads/master`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn for_branch(branch_name: &BranchName) -> Self {
        SymRefName(format!("{REF_PREFIX}{}", branch_name.as_ref()))
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    pub fn try_parse_sym_ref_name(sym_ref_name: &SymRefName) -> anyhow::Result<Self> {
        let name = sym_ref_name.0.strip_prefix(REF_PREFIX).with_context(|| {
            format!(
                "symbolic ref name must start with '{}', got '{}'",
                REF_PREFIX, sym_ref_name.0
            )
        })?;

        Self::try_parse(name.to_string())
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
