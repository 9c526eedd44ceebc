//! Command-line configuration.

use crate::commands::Command;
use anyhow::{bail, Context};
use clap::{ArgAction, Parser, ValueEnum};
use corelib::hasher::{Blake3Hash, Hasher, SipHash13, Xxh3, XxHash64};
use corelib::node::Node;
use replication::{CHash, Config, DistributionStrategy, ExactQuota, GenerousQuota};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Inspect how partitions are spread over weighted members.
#[derive(Debug, Parser)]
#[command(name = "chash", version)]
pub struct CliConfig {
    /// Number of partitions.
    #[arg(short, long, default_value_t = 1000)]
    pub partitions: u64,

    /// Replicas per partition (0 means 1).
    #[arg(short, long, default_value_t = 3)]
    pub replication_factor: i64,

    /// Hash function for members, partitions and keys.
    #[arg(long, value_enum, default_value_t = HasherKind::Xxh64)]
    pub hasher: HasherKind,

    /// Quota policy.
    #[arg(long, value_enum, default_value_t = StrategyKind::Generous)]
    pub strategy: StrategyKind,

    /// JSON file with `[{"id": "...", "capacity": 1.0}, ...]`.
    #[arg(short = 'f', long)]
    pub members_file: Option<PathBuf>,

    /// Member as `id=capacity`; repeatable.
    #[arg(short, long = "member")]
    pub members: Vec<MemberSpec>,

    /// Increase log verbosity.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HasherKind {
    Xxh64,
    Xxh3,
    Siphash13,
    Blake3,
}

impl HasherKind {
    pub fn build(self) -> Arc<dyn Hasher> {
        match self {
            HasherKind::Xxh64 => Arc::new(XxHash64),
            HasherKind::Xxh3 => Arc::new(Xxh3),
            HasherKind::Siphash13 => Arc::new(SipHash13),
            HasherKind::Blake3 => Arc::new(Blake3Hash),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    Generous,
    Exact,
}

impl StrategyKind {
    pub fn build(self) -> Arc<dyn DistributionStrategy> {
        match self {
            StrategyKind::Generous => Arc::new(GenerousQuota),
            StrategyKind::Exact => Arc::new(ExactQuota),
        }
    }
}

/// A member as given on the command line or in a members file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberSpec {
    pub id: String,
    pub capacity: f64,
}

impl FromStr for MemberSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let Some((id, capacity)) = s.split_once('=') else {
            bail!("expected id=capacity, got {:?}", s);
        };
        let capacity = capacity
            .trim()
            .parse()
            .with_context(|| format!("invalid capacity for member {:?}", id))?;
        Ok(Self {
            id: id.trim().to_owned(),
            capacity,
        })
    }
}

impl MemberSpec {
    pub fn into_node(self) -> Arc<Node> {
        Arc::new(Node::new(self.id, self.capacity))
    }
}

impl CliConfig {
    /// Parse members from the file (if any) followed by `--member` flags.
    pub fn load_members(&self) -> anyhow::Result<Vec<MemberSpec>> {
        let mut members = Vec::new();
        if let Some(path) = &self.members_file {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let parsed: Vec<MemberSpec> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", path.display()))?;
            members.extend(parsed);
        }
        members.extend(self.members.iter().cloned());
        Ok(members)
    }

    /// Build a populated ring from this configuration.
    pub fn build(&self) -> anyhow::Result<CHash<Node>> {
        let config = Config::new(self.partitions, self.replication_factor)
            .with_hasher(self.hasher.build())
            .with_strategy(self.strategy.build());
        let chash = CHash::new(config).context("invalid ring configuration")?;
        let members = self.load_members()?;
        debug!(members = members.len(), "loaded members");
        chash
            .add_members(members.into_iter().map(MemberSpec::into_node))
            .context("adding members")?;
        Ok(chash)
    }

    fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        // Keep an already installed subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn run(self) -> anyhow::Result<()> {
        self.init_tracing();
        let chash = self.build()?;
        let result = self.command.execute(&chash)?;
        print!("{}", result);
        Ok(())
    }
}
