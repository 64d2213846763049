use crate::domain::model::ActingUser;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "binder-check")]
#[command(about = "Run a binder through pre-process, validate and process without saving it")]
pub struct CliConfig {
    #[arg(long, help = "Engine TOML configuration")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Binder JSON file")]
    pub binder: PathBuf,

    #[arg(long, help = "Serve file records from a JSON fixture instead of HTTP")]
    pub fixture: Option<PathBuf>,

    #[arg(long)]
    pub user_id: String,

    #[arg(long)]
    pub agency_id: String,

    #[arg(long)]
    pub participant_id: String,

    #[arg(long, default_value = "BINDER")]
    pub application_code: String,

    #[arg(long, help = "Binder id from the route when editing")]
    pub route_id: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn acting_user(&self) -> ActingUser {
        ActingUser {
            user_id: self.user_id.clone(),
            agency_id: self.agency_id.clone(),
            participant_id: self.participant_id.clone(),
            application_code: self.application_code.clone(),
        }
    }
}
