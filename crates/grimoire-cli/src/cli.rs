//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use grimoire_core::ai::CharacterProfile;

/// Grimoire - Tormenta 20 combat manual
#[derive(Parser)]
#[command(name = "grimoire")]
#[command(about = "Organize Tormenta 20 powers into combat scenarios", long_about = None)]
pub struct Cli {
    /// Database file (defaults to ~/.grimoire/grimoire.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.grimoire/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List scenarios, marking the active one
    List,

    /// Show the skills of a scenario (defaults to the active one)
    Show { scenario: Option<String> },

    /// Manage scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommand),

    /// Manage skills
    #[command(subcommand)]
    Skill(SkillCommand),

    /// Ask the AI assistant for suggestions
    #[command(subcommand)]
    Suggest(SuggestCommand),

    /// Manage the suggestion service API key
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Create a scenario and make it active
    Add { name: String },

    /// Make a scenario active (by id or name)
    Select { scenario: String },

    /// Delete a scenario and all of its skills
    Delete {
        scenario: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Add a skill to a scenario
    Add {
        /// Scenario id or name (defaults to the active one)
        #[arg(short, long)]
        scenario: Option<String>,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        mana_cost: Option<String>,
        #[arg(short, long)]
        origin: Option<String>,
    },

    /// Edit a skill; omitted fields keep their current value
    Edit {
        skill_id: String,
        #[arg(short, long)]
        scenario: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        mana_cost: Option<String>,
        #[arg(short, long)]
        origin: Option<String>,
    },

    /// Delete a skill
    Delete {
        skill_id: String,
        #[arg(short, long)]
        scenario: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SuggestCommand {
    /// Suggest powers for a scenario
    Skills {
        /// Scenario id or name (defaults to the active one)
        #[arg(short, long)]
        scenario: Option<String>,
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        accept: AcceptArgs,
    },

    /// Suggest scenarios for a character
    Scenarios {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        accept: AcceptArgs,
    },
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub race: String,
    #[arg(long = "class")]
    pub class: String,
    #[arg(long)]
    pub level: String,
    #[arg(long)]
    pub deity: Option<String>,
    /// Notable trait, e.g. "dual-wielder" or "fire spells"
    #[arg(long = "trait", default_value = "")]
    pub notable_trait: String,
}

impl From<ProfileArgs> for CharacterProfile {
    fn from(args: ProfileArgs) -> Self {
        CharacterProfile {
            race: args.race,
            class: args.class,
            deity: args.deity,
            level: args.level,
            notable_trait: args.notable_trait,
        }
    }
}

#[derive(Args)]
pub struct AcceptArgs {
    /// Accept suggestions without prompting: "all", "none", or numbers like "1,3"
    #[arg(long)]
    pub accept: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Store an API key in ~/.grimoire/tokens/credentials.json
    SetKey { key: String },
    /// Remove the stored API key
    ClearKey,
    /// Show effective configuration
    Show,
}
