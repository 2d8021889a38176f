use clap::{Parser, ValueEnum};
use web_reader::{ParserKind, ReaderConfig, ReaderError};

#[derive(Parser, Debug)]
#[command(name = "web-reader")]
#[command(about = "Fetch a web page and print a readable summary")]
#[command(version)]
pub struct Args {
    /// Page to read (absolute http:// or https:// URL)
    pub url: String,

    /// Request timeout in seconds (5-300, defaults to the configured value)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum number of main-content characters to print (1000-100000)
    #[arg(long)]
    pub max_content_length: Option<usize>,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Do not list the page's links
    #[arg(long)]
    pub no_links: bool,

    /// Do not list the page's images
    #[arg(long)]
    pub no_images: bool,

    /// Parser to use (html, regex)
    #[arg(short, long, value_enum)]
    pub parser: Option<ParserArg>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParserArg {
    Html,
    Regex,
}

impl From<ParserArg> for ParserKind {
    fn from(arg: ParserArg) -> Self {
        match arg {
            ParserArg::Html => ParserKind::Html,
            ParserArg::Regex => ParserKind::Regex,
        }
    }
}

impl Args {
    /// Build the configuration: file (or defaults), then environment, then flags
    pub fn build_config(&self) -> Result<ReaderConfig, ReaderError> {
        let base = match &self.config {
            Some(path) => ReaderConfig::from_file(path)?,
            None => ReaderConfig::default(),
        };
        let mut config = base.with_env_overrides()?;

        if let Some(max) = self.max_content_length {
            config.max_content_length = max;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if self.no_links {
            config.extract_links = false;
        }
        if self.no_images {
            config.extract_images = false;
        }
        if let Some(parser) = self.parser {
            config.parser = parser.into();
        }

        config.validate()?;
        Ok(config)
    }
}
