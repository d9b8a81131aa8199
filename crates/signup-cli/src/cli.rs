use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use signup_core::VERSION;

/// Signup - user registration and document store tooling
#[derive(Parser)]
#[command(name = "signup")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the document store file
    #[arg(short, long, global = true, env = "SIGNUP_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and create the document store
    Init(InitArgs),

    /// Register a new user
    Register(RegisterArgs),

    /// Sign in with email and password
    Login(LoginArgs),

    /// Add a document to a collection
    Add(AddArgs),

    /// Show a document by ID
    Get(DocumentRef),

    /// List every document in a collection
    List {
        /// Collection name
        #[arg(value_name = "COLLECTION")]
        collection: String,
    },

    /// Query a collection with a single filter
    Query(QueryArgs),

    /// Merge fields into an existing document
    Update(UpdateArgs),

    /// Delete a document (no error if it does not exist)
    Delete(DocumentRef),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the document store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Collection user records are written to
    #[arg(long)]
    pub users_collection: Option<String>,

    /// Key user records by normalized email
    #[arg(long)]
    pub key_by_email: bool,
}

/// Arguments for the `register` command
#[derive(Args)]
pub struct RegisterArgs {
    /// Username
    #[arg(long, default_value = "")]
    pub username: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Password (falls back to SIGNUP_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Password (falls back to SIGNUP_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Collection plus document ID
#[derive(Args)]
pub struct DocumentRef {
    /// Collection name
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Document ID
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Collection name
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    /// Collection name
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Document ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Document fields given on the command line
#[derive(Args)]
pub struct DataArgs {
    /// Field assignment (key=value); repeatable
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Fields as a JSON object (merged before --field values)
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,
}

/// Arguments for the `query` command
#[derive(Args)]
pub struct QueryArgs {
    /// Collection name
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Field to filter on
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Operator (==, !=, <, <=, >, >=, array-contains, array-contains-any, in, not-in)
    #[arg(value_name = "OP", allow_hyphen_values = true)]
    pub op: String,

    /// Value to compare against (parsed as JSON when possible)
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}
