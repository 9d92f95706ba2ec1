use clap::{Parser, Subcommand};
use profile_matching_engine::{FactorKey, NewPlayer, RecruitmentEngine, ScoreKey, SettingsUpdate};

#[derive(Parser)]
#[command(name = "profile-matching-cli")]
#[command(about = "Profile Matching Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, env = "DB_PATH", default_value = "profile_matching.db")]
    db: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the player ranking
    Ranking {
        /// Only show one position
        #[arg(short, long)]
        position: Option<String>,

        /// Score to sort by (core, secondary, total)
        #[arg(short, long, default_value = "total")]
        sort_by: ScoreKey,

        /// Maximum rows
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Dashboard summary of the ranking
    Summary,

    /// Show or change profile matching settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage player records
    Players {
        #[command(subcommand)]
        action: PlayersAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,

    /// Replace group assignments and weights
    Set {
        /// Core factors (comma separated, e.g. winRate,kda,rank)
        #[arg(long, value_delimiter = ',')]
        core: Vec<FactorKey>,

        /// Secondary factors (comma separated)
        #[arg(long, value_delimiter = ',')]
        secondary: Vec<FactorKey>,

        #[arg(long)]
        weight_core: Option<f64>,

        #[arg(long)]
        weight_secondary: Option<f64>,
    },
}

#[derive(Subcommand)]
enum PlayersAction {
    /// List stored players
    List {
        /// Only players whose name or position contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a player
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        position: String,

        #[arg(long)]
        win_rate: f64,

        #[arg(long)]
        rank: f64,

        #[arg(long)]
        kda: f64,

        /// Nasional, Provinsi or Kota
        #[arg(long)]
        certificate: Option<String>,

        #[arg(long)]
        tournaments: Option<u32>,
    },

    /// Remove a player by id
    Remove { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let engine = RecruitmentEngine::open(&cli.db).await?;

    match cli.command {
        Commands::Ranking { position, sort_by, top } => {
            let mut report = engine.ranking_report().await?;
            if let Some(position) = position.as_deref() {
                report = report.filter_position(position);
            }
            report = report.sorted_by(sort_by);

            println!("Ranking ({} players, sorted by {}):", report.player_count, sort_by);
            println!("   Positions: {}", report.positions().join(", "));
            let rows = report.top(top.unwrap_or(report.players.len()));
            for (i, ranked) in rows.iter().enumerate() {
                println!("   {:>3}. {}", i + 1, ranked.display());
            }
            println!("   Latency: {:.2}ms", report.latency_ms);
        }

        Commands::Summary => {
            let summary = engine.ranking_report().await?.summary();

            println!("Ranking Summary:");
            println!("   Total players: {}", summary.total_players);
            println!("   Avg core score: {:.2}", summary.avg_core);
            println!("   Avg secondary score: {:.2}", summary.avg_secondary);
            if let Some(top) = summary.top_player {
                println!("   Top player: {} ({:.2})", top.full_name, top.scores.total);
            }
        }

        Commands::Settings { action: SettingsAction::Show } => {
            let settings = engine.get_settings().await?;
            print_settings(&settings);
        }

        Commands::Settings {
            action: SettingsAction::Set { core, secondary, weight_core, weight_secondary },
        } => {
            let settings = engine
                .update_settings(SettingsUpdate {
                    core_factors: core,
                    secondary_factors: secondary,
                    weight_core,
                    weight_secondary,
                })
                .await?;

            println!("Settings updated");
            print_settings(&settings);
        }

        Commands::Players { action: PlayersAction::List { search } } => {
            let players = match search.as_deref() {
                Some(query) => engine.search_players(query).await?,
                None => engine.list_players().await?,
            };
            for player in players {
                println!(
                    "   #{} {} winRate={} rank={} kda={} cert={} tournaments={}",
                    player.id,
                    player.display_name(),
                    player.win_rate,
                    player.rank,
                    player.kda,
                    player.tournament_certificate.as_deref().unwrap_or("-"),
                    player.tournament_experience_count.unwrap_or(0)
                );
            }
        }

        Commands::Players {
            action: PlayersAction::Add { name, position, win_rate, rank, kda, certificate, tournaments },
        } => {
            let player = NewPlayer::new(name, position, win_rate, rank, kda)
                .with_tournaments(certificate.as_deref(), tournaments);
            let created = engine.create_player(player).await?;
            println!("Added player #{} {}", created.id, created.display_name());
        }

        Commands::Players { action: PlayersAction::Remove { id } } => {
            engine.delete_player(id).await?;
            println!("Deleted player #{}", id);
        }
    }

    Ok(())
}

fn print_settings(settings: &profile_matching_engine::ProfileMatchingSettings) {
    let names = |keys: &[FactorKey]| keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ");

    println!("Profile Matching Settings:");
    println!("   Core ({:.2}): {}", settings.weight_core, names(&settings.core_factors));
    println!("   Secondary ({:.2}): {}", settings.weight_secondary, names(&settings.secondary_factors));
    println!("   Updated: {}", settings.updated_at.format("%Y-%m-%d %H:%M:%S"));
}
