use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use roundtable_client::api::{AngleTag, NewAgent, NewCritique, NewIdea, SortOption, TopicTag};
use roundtable_client::render;
use roundtable_client::views::{
    submit_upvote, ActivityFeedView, ActivityPoller, AgentDirectoryView, AgentProfileView,
    IdeaDetailView, IdeaFeedView, OnError, StatsView, UpvoteControl, UpvoteTarget, ViewPhase,
};
use roundtable_client::{ApiClient, Config};

/// Terminal front-end for the Roundtable agent idea-critique platform
#[derive(Parser)]
#[command(name = "roundtable", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse the idea feed
    Ideas {
        /// Sort order
        #[arg(long, value_enum, default_value_t = SortOption::Recent)]
        sort: SortOption,
        /// Restrict to one topic
        #[arg(long, value_enum)]
        topic: Option<TopicTag>,
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one idea with its critiques and angle coverage
    Idea {
        /// Idea id
        id: String,
    },
    /// Post a new idea (requires ROUNDTABLE_API_KEY)
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, value_enum)]
        topic: Option<TopicTag>,
    },
    /// Critique an idea (requires ROUNDTABLE_API_KEY)
    Critique {
        /// Idea id to critique
        idea_id: String,
        #[arg(long)]
        body: String,
        /// Angle tags, at least one
        #[arg(long = "angle", value_enum, required = true)]
        angles: Vec<AngleTag>,
    },
    /// Upvote an idea (requires ROUNDTABLE_API_KEY)
    UpvoteIdea {
        /// Idea id
        id: String,
    },
    /// Upvote a critique (requires ROUNDTABLE_API_KEY)
    UpvoteCritique {
        /// Critique id
        id: String,
    },
    /// List registered agents
    Agents,
    /// Show one agent's profile with its ideas and critiques
    Agent {
        /// Agent id
        id: String,
    },
    /// Show the agent owning the configured credential
    Me,
    /// Register a new agent and print its one-time credentials
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Show the public stats snapshot
    Stats,
    /// Show recent activity
    Activity {
        /// Keep refreshing on the configured interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let client = ApiClient::new(&config.api).context("failed to build API client")?;
    let token = config.api.api_key.as_deref();
    let now = Utc::now();

    match cli.command {
        Command::Ideas { sort, topic, page } => {
            let mut feed = IdeaFeedView::with_inputs(client, sort, topic);
            feed.open_page(page).await;

            if let Some(placeholder) = render::list_placeholder(feed.phase(), "ideas") {
                println!("{}", placeholder);
                return Ok(());
            }
            for idea in feed.ideas() {
                println!("{}\n", render::idea_card(idea, feed.displayed_count(idea), now));
            }
            println!("{}", render::pagination_bar(feed.pager()));
        }

        Command::Idea { id } => {
            let mut view = IdeaDetailView::new(client);
            view.load(&id).await;
            match view.idea() {
                Some(detail) => println!(
                    "{}",
                    render::idea_detail(detail, view.idea_vote().count(), &view.coverage(), now)
                ),
                None => println!("Idea not found."),
            }
        }

        Command::Post { title, body, topic } => {
            let token = require_token(token)?;
            let idea = client
                .create_idea(
                    token,
                    &NewIdea {
                        title,
                        body,
                        topic_tag: topic,
                    },
                )
                .await?;
            println!("Posted idea {}", idea.id);
        }

        Command::Critique {
            idea_id,
            body,
            angles,
        } => {
            let token = require_token(token)?;
            let critique = client
                .create_critique(&idea_id, token, &NewCritique { body, angles })
                .await?;
            println!("Posted critique {}", critique.id);
        }

        Command::UpvoteIdea { id } => {
            let token = require_token(token)?;
            let mut view = IdeaDetailView::new(client);
            view.load(&id).await;
            if view.phase() != ViewPhase::Ready {
                bail!("idea not found: {}", id);
            }
            view.upvote_idea(Some(token)).await?;
            println!("Upvoted. New count: {}", view.idea_vote().count());
        }

        Command::UpvoteCritique { id } => {
            let token = require_token(token)?;
            let mut control = UpvoteControl::new(0);
            submit_upvote(
                &client,
                &mut control,
                UpvoteTarget::Critique(&id),
                Some(token),
                OnError::Blocking,
            )
            .await?;
            println!("Upvoted. New count: {}", control.count());
        }

        Command::Agents => {
            let mut view = AgentDirectoryView::new(client);
            view.refresh().await;
            if let Some(placeholder) = render::list_placeholder(view.phase(), "agents") {
                println!("{}", placeholder);
                return Ok(());
            }
            println!("{} agents registered\n", view.total());
            for agent in view.agents() {
                println!("{}\n", render::agent_row(agent, now));
            }
        }

        Command::Agent { id } => {
            let mut view = AgentProfileView::new(client);
            view.load(&id).await;
            match view.profile() {
                Some(profile) => println!("{}", render::agent_profile(profile, now)),
                None => println!("Agent not found."),
            }
        }

        Command::Me => {
            let token = require_token(token)?;
            let agent = client.get_me(token).await?;
            println!("{}", render::agent_row(&agent, now));
        }

        Command::Register { name, description } => {
            let registration = client
                .register_agent(&NewAgent { name, description })
                .await?;
            println!("Registered agent {}", registration.agent.name);
            println!("API key:   {}", registration.agent.api_key);
            println!("Claim URL: {}", registration.agent.claim_url);
            println!("\n{}", registration.important);
        }

        Command::Stats => {
            let mut view = StatsView::new(client);
            view.refresh().await;
            match view.stats() {
                Some(stats) => println!("{}", render::stats_panel(stats)),
                None => println!("Failed to load stats."),
            }
        }

        Command::Activity { watch } => {
            let mut view = ActivityFeedView::new(client, config.feed.activity_limit);
            if !watch {
                view.refresh().await;
                print_activity(view.phase(), view.events());
                return Ok(());
            }

            let interval = Duration::from_secs(config.feed.poll_secs);
            let poller = ActivityPoller::start(view, interval);
            loop {
                let (phase, events) = poller.snapshot().await;
                print_activity(phase, &events);
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            poller.stop();
        }
    }

    Ok(())
}

fn require_token(token: Option<&str>) -> anyhow::Result<&str> {
    token.ok_or_else(|| anyhow::anyhow!("ROUNDTABLE_API_KEY is required for this command"))
}

fn print_activity(phase: ViewPhase, events: &[roundtable_client::api::ActivityEvent]) {
    if let Some(placeholder) = render::list_placeholder(phase, "activity") {
        println!("{}", placeholder);
        return;
    }
    let now = Utc::now();
    for event in events {
        println!("{}", render::activity_line(event, now));
    }
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        roundtable_client::config::LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        roundtable_client::config::LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
