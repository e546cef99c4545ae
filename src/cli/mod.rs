use crate::config::Settings;
use crate::core::executor::ExecutorError;
use crate::core::gate::{check_submission, GateDecision};
use crate::models::{
    AnalysisRequest, LoginRequest, RegisterRequest, ResumeFile, UpdateProfileRequest,
};
use crate::services::{ApiClient, ApiError, SessionStore};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use validator::Validate;

pub mod render;

#[derive(Debug, Parser)]
#[command(
    name = "resume-match",
    version,
    about = "Client for the AI resume suitability analyzer"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a resume and a job description for suitability analysis
    Analyze {
        /// Path to the resume file (pdf, doc, docx, png, jpg, jpeg; max 5 MiB)
        #[arg(long)]
        resume: PathBuf,
        /// Job description text
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,
        /// Read the job description from a file instead
        #[arg(long)]
        job_file: Option<PathBuf>,
    },
    /// Log in and persist the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show who is currently logged in
    Whoami,
    /// List past analyses, newest first
    History,
    /// View or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Administrative operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the current profile
    Show,
    /// Update full name and/or email
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Upload a profile picture (png/jpg/jpeg, max 5 MiB)
    Picture { path: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Show user and analysis totals
    Stats,
    /// List users
    Users {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// List analyses
    Analyses {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Delete a user and their analyses
    DeleteUser { id: i64 },
    /// Change a user's role (USER or ADMIN)
    SetRole { id: i64, role: String },
    /// Delete an analysis record
    DeleteAnalysis { id: i64 },
}

/// Executes one CLI command against the backend.
pub async fn run(command: Commands, settings: Settings) -> Result<()> {
    let client = ApiClient::from_settings(&settings);
    let store = SessionStore::new(&settings.session.path);

    match command {
        Commands::Analyze {
            resume,
            job,
            job_file,
        } => analyze(&client, &store, &resume, job, job_file).await,

        Commands::Login { username, password } => {
            let request = LoginRequest { username, password };
            request
                .validate()
                .map_err(|e| anyhow!("invalid login input: {}", e))?;
            let session = client.login(&request).await?;
            store.save(&session)?;
            println!("Logged in as {}", session.username);
            Ok(())
        }

        Commands::Register {
            username,
            email,
            full_name,
            password,
        } => {
            let request = RegisterRequest {
                username,
                email,
                full_name,
                password,
            };
            request
                .validate()
                .map_err(|e| anyhow!("invalid registration input: {}", e))?;
            let confirmation = client.register(&request).await?;
            println!("{}", confirmation.message);
            println!("You can now log in with `resume-match login {}`", request.username);
            Ok(())
        }

        Commands::Logout => {
            store.clear()?;
            println!("Logged out");
            Ok(())
        }

        Commands::Whoami => {
            match store.load()? {
                Some(session) => println!("Logged in as {}", session.username),
                None => println!("Not logged in"),
            }
            Ok(())
        }

        Commands::History => {
            let session = require_session(&store)?;
            let history = authed(&store, client.history(&session).await)?;
            println!("{}", render::render_history(&history));
            Ok(())
        }

        Commands::Profile { action } => match action {
            ProfileAction::Show => {
                let session = require_session(&store)?;
                let profile = authed(&store, client.profile(&session).await)?;
                println!("{}", render::render_profile(&profile));
                Ok(())
            }
            ProfileAction::Update { full_name, email } => {
                let session = require_session(&store)?;
                // Fill in whichever side was not given from the current profile
                let current = authed(&store, client.profile(&session).await)?;
                let request = UpdateProfileRequest {
                    full_name: full_name
                        .or(current.full_name)
                        .unwrap_or_default(),
                    email: email.or(current.email).unwrap_or_default(),
                };
                let confirmation =
                    authed(&store, client.update_profile(&session, &request).await)?;
                if confirmation.message.is_empty() {
                    println!("Profile updated successfully!");
                } else {
                    println!("{}", confirmation.message);
                }
                Ok(())
            }
            ProfileAction::Picture { path } => {
                let session = require_session(&store)?;
                let picture = read_file(&path)?;
                match picture.extension().as_deref() {
                    Some("png") | Some("jpg") | Some("jpeg") => {}
                    _ => bail!("only image files are allowed (png, jpg, jpeg)"),
                }
                if picture.size() > crate::core::gate::MAX_RESUME_BYTES {
                    bail!("image must be less than 5 MiB");
                }
                let response = authed(&store, client.upload_picture(&session, &picture).await)?;
                println!("Profile picture updated: {}", response.profile_picture);
                Ok(())
            }
        },

        Commands::Admin { action } => match action {
            AdminAction::Stats => {
                let session = require_session(&store)?;
                let stats = authed(&store, client.admin_stats(&session).await)?;
                println!("{}", render::render_stats(&stats));
                Ok(())
            }
            AdminAction::Users { page, size } => {
                let session = require_session(&store)?;
                let users = authed(&store, client.admin_users(&session, page, size).await)?;
                println!("{}", render::render_users(&users));
                Ok(())
            }
            AdminAction::Analyses { page, size } => {
                let session = require_session(&store)?;
                let analyses =
                    authed(&store, client.admin_analyses(&session, page, size).await)?;
                println!("{}", render::render_analyses(&analyses));
                Ok(())
            }
            AdminAction::DeleteUser { id } => {
                let session = require_session(&store)?;
                let confirmation = authed(&store, client.delete_user(&session, id).await)?;
                println!("{}", confirmation.message);
                Ok(())
            }
            AdminAction::SetRole { id, role } => {
                let session = require_session(&store)?;
                let user = authed(&store, client.update_role(&session, id, &role).await)?;
                println!("Role for {} is now {}", user.username, user.role);
                Ok(())
            }
            AdminAction::DeleteAnalysis { id } => {
                let session = require_session(&store)?;
                let confirmation = authed(&store, client.delete_analysis(&session, id).await)?;
                println!("{}", confirmation.message);
                Ok(())
            }
        },
    }
}

/// The analyze flow: gate first, then the resilient executor.
async fn analyze(
    client: &ApiClient,
    store: &SessionStore,
    resume: &Path,
    job: Option<String>,
    job_file: Option<PathBuf>,
) -> Result<()> {
    let job_description = match (job, job_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("provide the job description via --job or --job-file"),
    };

    let file = read_file(resume)?;
    let session = store.load()?;

    match check_submission(Some(&file), &job_description, session.as_ref()) {
        GateDecision::Proceed => {}
        GateDecision::RedirectToLogin => {
            bail!("not logged in - run `resume-match login <username> --password <password>` first")
        }
        GateDecision::Invalid(issue) => bail!("{}", issue),
    }

    let request = AnalysisRequest {
        resume: file,
        job_description,
    };

    println!("Analyzing resume against the job description...");
    match client.analyze(&request, session.as_ref()).await {
        Ok(outcome) => {
            println!("{}", render::render_outcome(&outcome));
            Ok(())
        }
        Err(err @ ExecutorError::Auth { .. }) => {
            store.clear()?;
            Err(anyhow!("{}", err))
        }
        Err(err) => Err(anyhow!(
            "Analysis failed: {}. The scoring job may still have gone through - check `resume-match history` later.",
            err
        )),
    }
}

fn read_file(path: &Path) -> Result<ResumeFile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(ResumeFile::new(file_name, bytes))
}

fn require_session(store: &SessionStore) -> Result<crate::models::Session> {
    store
        .load()?
        .ok_or_else(|| anyhow!("not logged in - run `resume-match login` first"))
}

/// Unwraps a thin API call, tearing the session down on 401/403 so the
/// next command prompts for a fresh login.
fn authed<T>(store: &SessionStore, result: std::result::Result<T, ApiError>) -> Result<T> {
    match result {
        Err(ApiError::Unauthorized { status }) => {
            let _ = store.clear();
            Err(anyhow!(
                "session rejected (status {}), please log in again",
                status
            ))
        }
        other => Ok(other?),
    }
}
