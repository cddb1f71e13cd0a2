use clap::{Parser, Subcommand};

use crate::calc::{self, CalcError};
use crate::chat::{ChatClient, ChatError};
use crate::config::{Config, ConfigError};
use crate::plot::{self, PlotError};
use crate::symbolic;
use crate::topic::Topic;

/// Errors the CLI application can surface.
#[derive(Debug)]
pub enum AppError {
    /// Configuration load/save error
    Config(ConfigError),
    /// Unknown topic name
    Topic(String),
    /// Calculation or input error
    Calc(CalcError),
    /// Plot curve generation error
    Plot(PlotError),
    /// Chat completion error
    Chat(ChatError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "configuration error: {e}"),
            AppError::Topic(msg) => write!(f, "{msg}"),
            AppError::Calc(e) => write!(f, "{e}"),
            AppError::Plot(e) => write!(f, "{e}"),
            AppError::Chat(e) => write!(f, "chat error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<CalcError> for AppError {
    fn from(value: CalcError) -> Self {
        AppError::Calc(value)
    }
}

impl From<PlotError> for AppError {
    fn from(value: PlotError) -> Self {
        AppError::Plot(value)
    }
}

impl From<ChatError> for AppError {
    fn from(value: ChatError) -> Self {
        AppError::Chat(value)
    }
}

/// Headless companion to the GUI: the same calculations from the shell.
#[derive(Debug, Parser)]
#[command(name = "englab_cli", about = "Dotmini ENGLab command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the supported topics and their input fields.
    Topics,
    /// Run a topic formula; values are given in field order.
    Calc {
        /// Topic name, e.g. "dynamics" or "newtons-laws"
        topic: String,
        /// Field values in the order reported by `topics`
        values: Vec<String>,
    },
    /// Differentiate an expression.
    Diff {
        /// Expression, e.g. "x^2 + 2*x + 1"
        expression: String,
        /// Variable to differentiate with respect to
        #[arg(long, default_value = "x")]
        var: String,
    },
    /// Sample a topic curve and print (x, y) pairs.
    Curve {
        topic: String,
        values: Vec<String>,
    },
    /// Send a single message to the chat completion endpoint.
    Chat {
        message: String,
        /// Ask the model to format math as LaTeX
        #[arg(long)]
        latex: bool,
    },
}

fn parse_topic(name: &str) -> Result<Topic, AppError> {
    name.parse::<Topic>().map_err(AppError::Topic)
}

/// Dispatches one CLI command.
pub fn run(command: Command, config: &Config) -> Result<(), AppError> {
    match command {
        Command::Topics => {
            for topic in Topic::ALL {
                let plot = if topic.plot_supported() { "plot" } else { "no plot" };
                println!("{topic} [{plot}]");
                for field in topic.fields() {
                    println!("  {} ({})", field.label, field.id);
                }
            }
        }
        Command::Calc { topic, values } => {
            let topic = parse_topic(&topic)?;
            println!("{}", calc::compute(topic, &values)?);
        }
        Command::Diff { expression, var } => {
            let derivative = symbolic::differentiate(&expression, &var)
                .map_err(CalcError::Parse)?;
            println!("Derivative: {derivative}");
        }
        Command::Curve { topic, values } => {
            let topic = parse_topic(&topic)?;
            let curve = plot::curve(topic, &values)?;
            println!("# {}", curve.title);
            for series in &curve.series {
                println!("# {}", series.name);
                for [x, y] in &series.points {
                    println!("{x:.4}\t{y:.6}");
                }
            }
        }
        Command::Chat { message, latex } => {
            let client = ChatClient::new(&config.api);
            let reply = client.send(&message, latex)?;
            println!("{reply}");
        }
    }
    Ok(())
}
