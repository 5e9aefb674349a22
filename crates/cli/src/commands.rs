use clap::{Args, Subcommand};
use filters::ConfigOverrides;
use model::core::identifiers::DialectId;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a filter expression and print the SQL condition
    Compile {
        #[arg(long, help = "Column or SQL expression to filter")]
        column: String,

        #[arg(long, help = "Filter expression, e.g. '>=10 & <100 | \"n/a\"'")]
        expression: String,

        #[command(flatten)]
        options: ConfigArgs,

        #[arg(
            long,
            help = "Database URL used to pick the dialect and validate regular expressions"
        )]
        database_url: Option<String>,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Show how an expression is split into OR-groups of AND-segments
    Tokenize {
        #[arg(long)]
        expression: String,

        #[command(flatten)]
        options: ConfigArgs,
    },
    /// Test a database URL by running a trivial statement
    TestConn {
        #[arg(long)]
        database_url: String,
    },
}

/// Configuration file plus flags layered over it.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    #[arg(long, help = "JSON configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Dialect: mysql, postgres, mssql, mssql2012")]
    pub dialect: Option<String>,

    #[arg(long = "or", help = "OR delimiter")]
    pub or_delimiter: Option<String>,

    #[arg(long = "and", help = "AND delimiter")]
    pub and_delimiter: Option<String>,

    #[arg(long = "escape", help = "Escape sequence")]
    pub escape_sequence: Option<String>,

    #[arg(long, help = "Prefix that inverts a segment")]
    pub invert_prefix: Option<String>,

    #[arg(long, help = "Suffix that inverts a segment")]
    pub invert_suffix: Option<String>,
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            or_delimiter: self.or_delimiter.clone(),
            and_delimiter: self.and_delimiter.clone(),
            escape_sequence: self.escape_sequence.clone(),
            invert_logic_prefix: self.invert_prefix.clone(),
            invert_logic_suffix: self.invert_suffix.clone(),
            dialect: self.dialect.as_deref().map(DialectId::from),
            ..ConfigOverrides::default()
        }
    }
}
