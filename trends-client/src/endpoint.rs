pub const LOCAL_API_BASE: &str = "http://localhost:5000";
pub const DEPLOYED_API_BASE: &str = "https://trendtracker-046o.onrender.com";

const LOCAL_HOST: &str = "localhost";

/// Which backend the dashboard talks to. Chosen once from the host name and
/// never changed while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiEndpoint {
    Local,
    Deployed,
}

impl ApiEndpoint {
    pub fn for_host(host: &str) -> Self {
        if host == LOCAL_HOST {
            ApiEndpoint::Local
        } else {
            ApiEndpoint::Deployed
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            ApiEndpoint::Local => LOCAL_API_BASE,
            ApiEndpoint::Deployed => DEPLOYED_API_BASE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_host_selects_local_backend() {
        assert_eq!(ApiEndpoint::for_host("localhost"), ApiEndpoint::Local);
        assert_eq!(
            ApiEndpoint::for_host("localhost").base_url(),
            "http://localhost:5000"
        );
    }

    #[test]
    fn test_any_other_host_selects_deployed_backend() {
        for host in ["trendtracker.example.com", "127.0.0.1", "LOCALHOST", ""] {
            assert_eq!(ApiEndpoint::for_host(host), ApiEndpoint::Deployed);
        }
        assert_eq!(ApiEndpoint::Deployed.base_url(), DEPLOYED_API_BASE);
    }
}
