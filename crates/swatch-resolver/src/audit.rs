//! Deprecation audit.

use std::fmt;
use swatch_core::{Tier, TokenPath, TokenSet};

/// A deprecation problem found in a token set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFinding {
    /// A token references a deprecated token.
    DeprecatedReference {
        tier: Tier,
        token: TokenPath,
        reference: TokenPath,
        replaced_by: Option<TokenPath>,
    },
    /// A deprecated token names a replacement that does not exist.
    MissingReplacement {
        tier: Tier,
        token: TokenPath,
        replaced_by: TokenPath,
    },
}

impl AuditFinding {
    /// Missing replacements break the deprecation contract; deprecated
    /// references only need attention.
    pub fn is_error(&self) -> bool {
        matches!(self, AuditFinding::MissingReplacement { .. })
    }
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditFinding::DeprecatedReference {
                tier,
                token,
                reference,
                replaced_by,
            } => {
                write!(f, "{tier} token '{token}' references deprecated token '{reference}'")?;
                if let Some(replacement) = replaced_by {
                    write!(f, " (use '{replacement}')")?;
                }
                Ok(())
            }
            AuditFinding::MissingReplacement {
                tier,
                token,
                replaced_by,
            } => write!(
                f,
                "{tier} token '{token}' is replaced by '{replaced_by}', which does not exist"
            ),
        }
    }
}

/// Check deprecation metadata across all tiers.
pub fn audit(set: &TokenSet) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    for (tier, token) in set.iter() {
        if let Some(replacement) = &token.deprecation.replaced_by {
            let exists = set.tree(tier).contains(replacement)
                || set.lookup_reference(replacement).is_some();
            if !exists {
                findings.push(AuditFinding::MissingReplacement {
                    tier,
                    token: token.path.clone(),
                    replaced_by: replacement.clone(),
                });
            }
        }

        for reference in token.value.references() {
            if let Some((_, target)) = set.lookup_reference(&reference) {
                if target.is_deprecated() {
                    findings.push(AuditFinding::DeprecatedReference {
                        tier,
                        token: token.path.clone(),
                        reference,
                        replaced_by: target.deprecation.replaced_by.clone(),
                    });
                }
            }
        }
    }

    findings
}
