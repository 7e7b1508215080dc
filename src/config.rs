use clap::Parser;

use crate::hn_client::DEFAULT_API_URL;

#[derive(Debug, Clone, Parser)]
#[command(name = "quiet_hn", version, about = "Serves the top Hacker News link stories, without the noise")]
pub struct Args {
    /// The port to start the web server on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// The number of top stories to display
    #[arg(long, alias = "num_stories", env = "NUM_STORIES", default_value_t = 30)]
    pub num_stories: usize,

    /// Base URL of the Hacker News API
    #[arg(long, env = "HN_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["quiet_hn"]).unwrap();
        assert_eq!(args.port, 3000);
        assert_eq!(args.num_stories, 30);
        assert_eq!(args.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn underscore_alias_is_accepted() {
        let args = Args::try_parse_from(["quiet_hn", "--num_stories", "10", "--port", "8080"]).unwrap();
        assert_eq!(args.num_stories, 10);
        assert_eq!(args.port, 8080);
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Args::try_parse_from(["quiet_hn", "--port", "70000"]).is_err());
    }
}
