// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jobfinder")]
#[command(about = "Command line client for the JobFinder job board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all job postings
    Jobs,
    /// Post a new job listing
    PostJob {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        skills: String,
    },
    /// List uploaded resumes
    Resumes,
    /// Upload a resume (PDF or DOC/DOCX) and extract skills
    Upload { file: PathBuf },
    /// Match a resume against one job
    Match { resume_id: String, job_id: String },
    /// Match a resume against every stored job
    MatchAll { resume_id: String },
    /// Log in with email and password
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a new account
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the currently authenticated user
    Whoami,
}
