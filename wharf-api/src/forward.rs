//! Forwarding-URL construction.
//!
//! The deployment's proxy serves forwarded ports on a wildcard application
//! host (e.g. `*.apps.example.com`). The wildcard is substituted with a
//! subdomain that encodes the target: `{port}--{agent}--{workspace}--{user}`.
//! This is a wire contract with the proxy; the pieces and their order must
//! not change.

/// Build the canonical forwarding URL for a port on an agent.
///
/// `host` is the deployment's wildcard application host. When it contains a
/// `*`, the wildcard is replaced with the target subdomain; otherwise the
/// subdomain is prepended as an additional label.
pub fn forward_url(
    host: &str,
    port: u16,
    agent_name: &str,
    workspace_name: &str,
    username: &str,
) -> String {
    let subdomain = format!("{}--{}--{}--{}", port, agent_name, workspace_name, username);

    if host.contains('*') {
        format!("https://{}", host.replacen('*', &subdomain, 1))
    } else {
        format!("https://{}.{}", subdomain, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_substitution() {
        assert_eq!(
            forward_url("*.apps.example.com", 8080, "main", "dev", "alice"),
            "https://8080--main--dev--alice.apps.example.com"
        );
    }

    #[test]
    fn test_plain_host_prepends_subdomain() {
        assert_eq!(
            forward_url("apps.example.com", 3000, "gpu", "ml", "bob"),
            "https://3000--gpu--ml--bob.apps.example.com"
        );
    }

    #[test]
    fn test_deterministic() {
        let a = forward_url("*.apps.example.com", 8080, "main", "dev", "alice");
        let b = forward_url("*.apps.example.com", 8080, "main", "dev", "alice");
        assert_eq!(a, b);
    }

    #[test]
    fn test_changing_port_changes_only_port() {
        let a = forward_url("*.apps.example.com", 8080, "main", "dev", "alice");
        let b = forward_url("*.apps.example.com", 8081, "main", "dev", "alice");
        assert_ne!(a, b);
        assert_eq!(a.replacen("8080", "8081", 1), b);
    }
}
