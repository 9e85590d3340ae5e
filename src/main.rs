use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use interview_session::{
    format_elapsed, CaptureConfig, Config, HttpInterviewApi, InterviewApi, InterviewController,
    MockCaptureDevice, Recorder,
};

/// Headless interview runner against the scoring backend.
///
/// Uses a mock capture device, so answers are typed; the recording state
/// machine is still exercised end to end with --record.
#[derive(Parser)]
#[command(name = "interview-session", version)]
struct Cli {
    /// Config file (config/interview-session.toml); defaults are used if omitted
    #[arg(long)]
    config: Option<String>,

    /// Acting user id, sent as the bearer token on every request
    #[arg(long)]
    user_id: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new interview from an uploaded resume
    Create {
        #[arg(long)]
        resume_id: u64,
        #[arg(long)]
        title: String,
    },
    /// Run an interview session to completion
    Run {
        interview_id: u64,
        /// Record a mock audio take for each answer
        #[arg(long)]
        record: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let api = Arc::new(HttpInterviewApi::new(
        &cfg.backend.base_url,
        cli.user_id,
        Duration::from_secs(cfg.backend.timeout_secs),
    )?);

    match cli.command {
        Command::Create { resume_id, title } => {
            let interview = api.create_interview(cli.user_id, resume_id, &title).await?;
            info!("Created interview {} ('{}')", interview.id, interview.title);
            println!("{}", interview.id);
        }
        Command::Run {
            interview_id,
            record,
        } => {
            run_interview(api, &cfg, interview_id, record).await?;
        }
    }

    Ok(())
}

async fn run_interview(
    api: Arc<HttpInterviewApi>,
    cfg: &Config,
    interview_id: u64,
    record: bool,
) -> Result<()> {
    let capture_config = CaptureConfig {
        sample_rate: cfg.capture.sample_rate,
        channels: cfg.capture.channels,
        ..CaptureConfig::default()
    };
    let device = Arc::new(MockCaptureDevice::new(capture_config.clone()));
    let recorder = Recorder::new(device, capture_config, PathBuf::from(&cfg.capture.artifacts_path));

    let mut controller = InterviewController::load(api, recorder, interview_id).await?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let question = match controller.current_question() {
            Some(q) => q.clone(),
            None => break,
        };
        let (position, total) = controller.progress();
        println!();
        println!("Question {} of {}", position + 1, total);
        if let Some(kind) = &question.question_type {
            print!("[{}] ", kind.to_uppercase());
        }
        if let Some(level) = &question.difficulty_level {
            print!("({}) ", level);
        }
        println!("{}", question.question_text);

        if record {
            controller.begin_recording().await?;
            controller.end_recording().await?;
            println!("(recorded {} of audio)", format_elapsed(controller.elapsed_seconds()));
        }

        print!("> ");
        io::stdout().flush()?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        if let Err(e) = controller.submit_current_answer(&answer).await {
            eprintln!("{}", e);
            // Recoverable: the same question stays active for another try
            continue;
        }
    }

    controller.teardown().await;

    let interview = controller.interview();
    if controller.is_complete() {
        println!();
        println!("Interview completed!");
        if let Some(score) = interview.overall_score {
            println!("Overall score: {:.1}/10", score);
        }
        if let Some(minutes) = interview.total_duration {
            println!("Duration: {} min", minutes);
        }
        if let Some(feedback) = &interview.overall_feedback {
            println!();
            println!("{}", feedback);
        }
        for answer in &interview.answers {
            if let (Some(text), Some(score)) = (&answer.question_text, answer.score) {
                println!("  {:.1}/10  {}", score, text);
            }
        }
    }

    Ok(())
}
