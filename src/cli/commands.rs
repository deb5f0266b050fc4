use crate::context::RequestContext;
use crate::demo::{self, DemoRequest, SharedResponse};
use crate::runtime_config::RouterConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use std::path::PathBuf;

/// Command-line interface for multiroute
#[derive(Parser)]
#[command(name = "multiroute")]
#[command(about = "Ordered multi-match request router", long_about = None)]
pub struct Cli {
    /// Router configuration file (TOML)
    #[arg(long, global = true, env = "MULTIROUTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch one request through the demo application and print the response
    Dispatch {
        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request URI, optionally with a query string (e.g. /admin/deleteUser/5)
        #[arg(short, long)]
        path: String,

        /// Entry script path used to build redirect URLs
        #[arg(long, default_value = "/index.php")]
        script_name: String,

        /// Session user level (admin pages need 2)
        #[arg(long, default_value_t = 0)]
        user_level: u8,

        /// Basic-auth user name
        #[arg(long, requires = "auth_pw")]
        auth_user: Option<String>,

        /// Basic-auth password
        #[arg(long, requires = "auth_user")]
        auth_pw: Option<String>,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
    /// List the demo application's routes in evaluation order
    Routes,
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Invalid method, JSON body or configuration.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let config = RouterConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Dispatch {
            method,
            path,
            script_name,
            user_level,
            auth_user,
            auth_pw,
            body,
        } => {
            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("Invalid HTTP method '{method}'"))?;
            let context = RequestContext::from_uri(method, &path).with_script_name(script_name);

            let mut request = DemoRequest::new(context);
            request.user_level = user_level;
            request.auth = match (auth_user, auth_pw) {
                (Some(user), Some(pw)) if !user.is_empty() && !pw.is_empty() => Some((user, pw)),
                _ => None,
            };
            request.body = body
                .map(|b| serde_json::from_str(&b))
                .transpose()
                .context("--body is not valid JSON")?;

            let (response, count) = demo::run(&request, &config)?;

            println!("HTTP {}", response.status);
            for (name, value) in &response.headers {
                println!("{name}: {value}");
            }
            println!();
            println!("{}", response.body);
            if count > 1 {
                println!("Number of routes: {count}");
            }
            Ok(())
        }
        Commands::Routes => {
            let request = DemoRequest::new(RequestContext::from_uri(Method::GET, "/"));
            let app = demo::build_app(&request, &SharedResponse::default(), &config)?;
            app.dump_routes();
            for entry in app.before_routes() {
                println!("before  {entry}");
            }
            for entry in app.routes() {
                println!("main    {entry}");
            }
            Ok(())
        }
    }
}
