use regex::Regex;
use std::sync::LazyLock;

use super::Pattern;

macro_rules! secret_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Cloud providers ────────────────────────────────────────────────────────
secret_pattern!(RE_AWS_ACCESS_KEY, r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b");
secret_pattern!(
    RE_AWS_SECRET_KEY,
    r#"(?i)aws_secret(?:_access)?_key\s*[=:]\s*['"]?[A-Za-z0-9/+=]{40}['"]?"#
);
secret_pattern!(RE_GCP_API_KEY, r"\bAIza[0-9A-Za-z_-]{35}\b");

// ── Source hosting and registries ──────────────────────────────────────────
secret_pattern!(RE_GITHUB_TOKEN, r"\bgh[pousr]_[A-Za-z0-9]{36}\b");
secret_pattern!(RE_GITLAB_PAT, r"\bglpat-[A-Za-z0-9_-]{20,}\b");
secret_pattern!(RE_NPM_TOKEN, r"\bnpm_[A-Za-z0-9]{36}\b");

// ── SaaS ───────────────────────────────────────────────────────────────────
secret_pattern!(RE_SLACK_TOKEN, r"\bxox[abpr]-[0-9]{10,}-[0-9]{10,}-[A-Za-z0-9-]{20,}\b");
secret_pattern!(RE_STRIPE_KEY, r"\b[sr]k_(?:live|test)_[A-Za-z0-9]{24,}\b");
secret_pattern!(RE_OPENAI_KEY, r"\bsk-(?:proj-)?[A-Za-z0-9_-]{32,}\b");
secret_pattern!(RE_ANTHROPIC_KEY, r"\bsk-ant-[A-Za-z0-9_-]{32,}\b");

// ── Formats ────────────────────────────────────────────────────────────────
secret_pattern!(
    RE_JWT,
    r"\beyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\b"
);
secret_pattern!(
    RE_PRIVATE_KEY,
    r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |ENCRYPTED )?PRIVATE KEY-----(?s:.*?)(?:-----END (?:RSA |EC |DSA |OPENSSH |ENCRYPTED )?PRIVATE KEY-----|\z)"
);
secret_pattern!(RE_BEARER, r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]{20,}=*");

// ── Assignments ────────────────────────────────────────────────────────────
secret_pattern!(
    RE_PASSWORD_ASSIGN,
    r#"(?i)\b(?:password|passwd|pwd)\s*[=:]\s*['"][^'"\s]{4,}['"]"#
);
secret_pattern!(
    RE_API_KEY_ASSIGN,
    r#"(?i)\b(?:api[_-]?key|apikey|access[_-]?token|auth[_-]?token|client[_-]?secret)\s*[=:]\s*['"]?[A-Za-z0-9_\-]{16,}['"]?"#
);

/// Secret patterns, most specific first.
pub fn all_patterns() -> Vec<Pattern> {
    vec![
        Pattern::new("private_key", &RE_PRIVATE_KEY, "[PRIVATE_KEY]"),
        Pattern::new("aws_access_key", &RE_AWS_ACCESS_KEY, "[AWS_ACCESS_KEY]"),
        Pattern::new("aws_secret_key", &RE_AWS_SECRET_KEY, "[AWS_SECRET_KEY]"),
        Pattern::new("gcp_api_key", &RE_GCP_API_KEY, "[GCP_API_KEY]"),
        Pattern::new("github_token", &RE_GITHUB_TOKEN, "[GITHUB_TOKEN]"),
        Pattern::new("gitlab_token", &RE_GITLAB_PAT, "[GITLAB_TOKEN]"),
        Pattern::new("npm_token", &RE_NPM_TOKEN, "[NPM_TOKEN]"),
        Pattern::new("slack_token", &RE_SLACK_TOKEN, "[SLACK_TOKEN]"),
        Pattern::new("stripe_key", &RE_STRIPE_KEY, "[STRIPE_KEY]"),
        Pattern::new("anthropic_key", &RE_ANTHROPIC_KEY, "[API_KEY]"),
        Pattern::new("openai_key", &RE_OPENAI_KEY, "[API_KEY]"),
        Pattern::new("jwt", &RE_JWT, "[JWT]"),
        Pattern::new("bearer_token", &RE_BEARER, "[BEARER_TOKEN]"),
        Pattern::new("password_assignment", &RE_PASSWORD_ASSIGN, "[PASSWORD]"),
        Pattern::new("api_key_assignment", &RE_API_KEY_ASSIGN, "[API_KEY]"),
    ]
}
