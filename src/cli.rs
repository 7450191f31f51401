use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "civit", about = "Civic-issue dashboard CLI", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: compact|json|pretty
    #[arg(short, long, default_value = "compact", global = true)]
    pub format: String,

    /// Override database path (skips walk-up search)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new .civit.db database
    Init,

    /// Log in as a citizen, creating the profile if needed
    Login {
        /// Account email
        email: String,

        /// First name for the profile
        #[arg(long)]
        first_name: Option<String>,

        /// Last name for the profile
        #[arg(long)]
        last_name: Option<String>,
    },

    /// Report a new civic issue
    Report {
        /// Short issue title
        title: String,

        /// Freeform description
        #[arg(short, long)]
        description: Option<String>,

        /// Category label: roads, utilities, environment, safety, parks, ...
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Administrative area
        #[arg(long)]
        area: Option<String>,

        /// Ward identifier
        #[arg(long)]
        ward: Option<String>,

        /// Human-readable place name
        #[arg(long)]
        location_name: Option<String>,
    },

    /// Update an issue's status
    Update {
        /// Issue ID
        id: i64,

        /// New status: pending|acknowledged|in_progress|resolved
        #[arg(short, long)]
        status: String,
    },

    /// Per-location heatmap of your issues
    Heatmap {
        /// Filter by status, or 'all'
        #[arg(short, long, default_value = "all")]
        status: String,

        /// Filter by location, or 'all'
        #[arg(short, long, default_value = "all")]
        location: String,

        /// Rolling window: week|month|quarter|year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Max location cards
        #[arg(short = 'n', long, default_value_t = 8)]
        limit: usize,
    },

    /// Your filtered issue timeline
    Issues {
        /// Filter by status, or 'all'
        #[arg(short, long, default_value = "all")]
        status: String,

        /// Filter by location, or 'all'
        #[arg(short, long, default_value = "all")]
        location: String,

        /// Rolling window: week|month|quarter|year
        #[arg(short, long, default_value = "month")]
        period: String,

        /// Max results
        #[arg(short = 'n', long, default_value_t = 6)]
        limit: usize,
    },

    /// List observed location buckets
    Locations,

    /// View or submit feedback to the service operator
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },

    /// Whole-collection totals for your account
    Summary,
}

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// List submitted feedback with response status
    List,

    /// Submit new feedback
    Submit {
        /// Subject line
        subject: String,

        /// Message body
        message: String,

        /// Type: suggestion|complaint|compliment|inquiry
        #[arg(short, long, default_value = "suggestion")]
        kind: String,

        /// Priority: low|medium|high
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },
}
