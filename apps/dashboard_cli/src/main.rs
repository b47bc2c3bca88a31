use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::api::{HttpTeamApi, TeamApi};
use client_core::{ClientEvent, DashboardClient, Notification};
use shared::domain::TeamId;

#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the team service.
    #[arg(
        long,
        env = "APP__API_BASE_URL",
        default_value = "https://hands-on-iota.vercel.app"
    )]
    api_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all teams.
    Teams,
    /// List upcoming events.
    Events,
    /// Print one team.
    ShowTeam { team_id: String },
    /// Load a team, apply the given field changes, and submit the update.
    /// Fields left unset keep their loaded values.
    UpdateTeam {
        team_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        members: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    match cli.command {
        Command::Teams => {
            let api = HttpTeamApi::new(&cli.api_url)?;
            for team in api.list_teams().await? {
                println!(
                    "{}\t{}\t{}\tmembers={}",
                    team.id,
                    team.name,
                    team.category,
                    team.members.len()
                );
            }
        }
        Command::Events => {
            let api = HttpTeamApi::new(&cli.api_url)?;
            for event in api.fetch_events().await? {
                println!(
                    "{}\t{} {}\t{}\t{}",
                    event.title, event.date, event.time, event.location, event.category
                );
            }
        }
        Command::ShowTeam { team_id } => {
            let api = HttpTeamApi::new(&cli.api_url)?;
            let team = api.fetch_team(&TeamId::new(team_id)).await?;
            println!("name: {}", team.name);
            println!("description: {}", team.description);
            println!("category: {}", team.category);
            println!("members: {}", team.members.join(", "));
        }
        Command::UpdateTeam {
            team_id,
            name,
            description,
            category,
            members,
        } => {
            update_team(&cli.api_url, team_id, name, description, category, members).await?;
        }
    }

    Ok(())
}

async fn update_team(
    api_url: &str,
    team_id: String,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    members: Option<String>,
) -> Result<()> {
    let client = DashboardClient::new(api_url)?;
    let mut rx = client.subscribe_events();

    let outcome: Result<()> = async {
        client.open_team_editor(TeamId::new(team_id)).await?;
        let Some(snapshot) = client.editor_snapshot().await else {
            bail!("editor closed unexpectedly");
        };
        let mut fields = snapshot.fields;
        if let Some(name) = name {
            fields.name = name;
        }
        if let Some(description) = description {
            fields.description = description;
        }
        if let Some(category) = category {
            fields.category = category;
        }
        if let Some(members) = members {
            fields.members = members;
        }
        client.submit_team_update(fields).await?;
        Ok(())
    }
    .await;

    // Relay what the flow reported before surfacing the outcome.
    while let Ok(event) = rx.try_recv() {
        match event {
            ClientEvent::Notified(Notification::Toast { message, .. }) => println!("{message}"),
            ClientEvent::Notified(Notification::Alert { title, body }) => {
                eprintln!("{title}: {body}")
            }
            ClientEvent::EditorFieldErrors { errors, .. } => {
                for error in errors {
                    eprintln!("{}: {}", error.field, error.message);
                }
            }
            _ => {}
        }
    }

    outcome
}
