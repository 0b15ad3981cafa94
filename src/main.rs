use anyhow::{Context, Result};
use clap::Parser;
use jobfinder_client::cli::{Cli, Command};
use jobfinder_client::views::{
    JobListView, JobPostForm, LoginForm, MatchAllView, MatchForm, RegisterForm, ResumeListView,
    ResumeUploadForm,
};
use jobfinder_client::{ApiClient, AuthContext, ClientConfig, JobBoard, SessionStore};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load()?;

    let store = Arc::new(SessionStore::new(config.session_path.clone()));
    let client = Arc::new(ApiClient::new(&config, store.clone(), store.clone())?);
    let api: Arc<dyn JobBoard> = client;

    let auth = AuthContext::new(store, api.clone());
    auth.initialize().await;

    match cli.command {
        Command::Jobs => {
            let view = JobListView::new();
            view.refresh(api.as_ref()).await;
            println!("{}", view.render());
        }
        Command::PostJob {
            title,
            description,
            skills,
        } => {
            let form = JobPostForm::new();
            form.set_title(&title);
            form.set_description(&description);
            form.set_skills_required(&skills);
            form.submit(api.as_ref()).await;
            println!("{}", form.render());
        }
        Command::Resumes => {
            let view = ResumeListView::new();
            view.refresh(api.as_ref()).await;
            println!("{}", view.render());
        }
        Command::Upload { file } => {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid file name")?
                .to_string();
            let content = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read file: {}", file.display()))?;

            let form = ResumeUploadForm::new();
            form.select_file(&name, content);
            form.submit(api.as_ref()).await;
            println!("{}", form.render());
        }
        Command::Match { resume_id, job_id } => {
            let form = MatchForm::new();
            form.set_resume_id(&resume_id);
            form.set_job_id(&job_id);
            form.submit(api.as_ref()).await;
            println!("{}", form.render());
        }
        Command::MatchAll { resume_id } => {
            let view = MatchAllView::new();
            view.set_resume_id(&resume_id);
            view.submit(api.as_ref()).await;
            println!("{}", view.render());
        }
        Command::Login { email, password } => {
            let form = LoginForm::new();
            form.set_email(&email);
            form.set_password(&password);
            form.submit(api.as_ref(), &auth).await;
            println!("{}", form.render());
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm::new();
            form.set_username(&username);
            form.set_email(&email);
            form.set_password(&password);
            form.set_confirm_password(&confirm_password);
            form.submit(api.as_ref()).await;
            println!("{}", form.render());
        }
        Command::Logout => {
            auth.logout().await;
            println!("Logged out.");
        }
        Command::Whoami => {
            let snapshot = auth.snapshot().await;
            match snapshot.user {
                Some(user) => println!("{} <{}>", user.display_name(), user.email),
                None => println!("Not logged in."),
            }
        }
    }

    Ok(())
}
