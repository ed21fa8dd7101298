use clap::{Parser, Subcommand};
use daily_post::openai::OpenAiGenerator;
use daily_post::post::Post;
use daily_post::publish::{self, Credentials, OutboxUploader};
use daily_post::{category, config, output, prompt, render};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "daily-post")]
#[command(about = "Render and publish daily programming posts as images")]
#[command(long_about = "\
Render and publish daily programming posts as images

A post is a JSON object with three fields:

  {
    \"title\": \"One line headline\",
    \"description\": \"Paragraph text.\\n*  bullet one\\n*  bullet two\",
    \"code\": \"print('hello')\"
  }

It is rendered as a title with an underline, a wrapped description with
bullets, and a framed code block with the logo in its corner.

Assets are resolved relative to the config directory:

  .
  ├── config.toml         # Optional, overrides stock defaults
  ├── logo.png            # Optional, skipped with a warning when missing
  └── fonts/
      ├── Montserrat/static/Montserrat-Bold.ttf
      ├── Montserrat/static/Montserrat-SemiBold.ttf
      └── Fira_Code/FiraCode-VariableFont_wght.ttf

The publish command reads OPENAI_API_KEY (required), IG_USERNAME and
IG_PASSWORD from the environment.

Run 'daily-post gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and the assets it refers to
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a post JSON file to an image
    Render {
        /// Post JSON file
        post: PathBuf,
        /// Open the rendered image in the default viewer
        #[arg(long)]
        show: bool,
    },
    /// Print today's content category
    Category,
    /// Print the generation prompt for a category
    Prompt {
        /// Category to prompt for (defaults to today's)
        #[arg(long)]
        category: Option<String>,
    },
    /// Run the full pipeline: generate → caption → render → upload
    Publish {
        /// Directory the rendered image and caption are delivered to
        #[arg(long, default_value = "outbox")]
        outbox: PathBuf,
        /// Open the rendered image in the default viewer
        #[arg(long)]
        show: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { post, show } => {
            let post_config = config::load_config(&cli.config)?;
            let post = Post::load(&post)?;
            let report = render::render_post(&post, &post_config, &cli.config)?;
            output::print_render_report(&post.title, &report);
            if show {
                render::show_image(&report.output)?;
            }
        }
        Command::Category => {
            println!("{}", category::select_category());
        }
        Command::Prompt { category: name } => {
            let name = name.as_deref().unwrap_or_else(|| category::select_category());
            println!("{}", prompt::post_prompt(name));
        }
        Command::Publish { outbox, show } => {
            let post_config = config::load_config(&cli.config)?;
            let credentials = Credentials::from_env()?;
            let generator = OpenAiGenerator::new(&post_config.publish, &credentials.api_key)?;
            let uploader = OutboxUploader::new(outbox);
            let outcome = publish::publish(
                category::select_category(),
                &generator,
                |post| render::render_post(post, &post_config, &cli.config),
                &uploader,
                &credentials,
                Duration::from_secs(post_config.publish.pause_secs),
            )?;
            output::print_publish_outcome(&outcome);
            if show {
                render::show_image(&outcome.report.output)?;
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
