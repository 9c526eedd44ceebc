//! Subcommands.

use clap::Subcommand;
use corelib::node::{Member, Node};
use replication::CHash;
use std::fmt;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replica slots held by each member, in ring order.
    Load,
    /// Replicas of every partition, primary first.
    Table,
    /// Partition and replicas of each key.
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Ring order with each member's predecessor and successor.
    Ring,
}

/// Rendered output of a command, one line per entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub lines: Vec<String>,
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn join(replicas: &[std::sync::Arc<Node>]) -> String {
    replicas
        .iter()
        .map(|m| m.id())
        .collect::<Vec<_>>()
        .join(",")
}

impl Command {
    pub fn execute(&self, chash: &CHash<Node>) -> anyhow::Result<CommandResult> {
        let mut lines = Vec::new();
        match self {
            Command::Load => {
                let load = chash.partition_load();
                let total_slots: usize = load.iter().map(|(_, n)| n).sum();
                for (id, slots) in load {
                    let capacity = chash.get_member(&id).map_or(0.0, |m| m.capacity());
                    let share = if total_slots == 0 {
                        0.0
                    } else {
                        100.0 * slots as f64 / total_slots as f64
                    };
                    lines.push(format!(
                        "{}\tcapacity={}\tslots={}\tshare={:.2}%",
                        id, capacity, slots, share
                    ));
                }
            }
            Command::Table => {
                for p in 0..chash.partition_count() {
                    let replicas = chash.get_partition_members(p)?;
                    lines.push(format!("{}\t{}", p, join(&replicas)));
                }
            }
            Command::Lookup { keys } => {
                for key in keys {
                    let partition = chash.get_partition(key);
                    let replicas = chash.get_members(key);
                    lines.push(format!("{}\t{}\t{}", key, partition, join(&replicas)));
                }
            }
            Command::Ring => {
                for m in chash.members() {
                    let prev = chash.get_prev(m.id())?;
                    let next = chash.get_next(m.id())?;
                    lines.push(format!("{}\tprev={}\tnext={}", m.id(), prev.id(), next.id()));
                }
            }
        }
        Ok(CommandResult { lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replication::Config;
    use std::sync::Arc;

    fn chash() -> CHash<Node> {
        let chash = CHash::new(Config::new(10, 3)).unwrap();
        chash
            .add_members(vec![
                Arc::new(Node::new("1", 1.0)),
                Arc::new(Node::new("3", 0.5)),
                Arc::new(Node::new("4", 1.0)),
            ])
            .unwrap();
        chash
    }

    #[test]
    fn test_table() {
        let result = Command::Table.execute(&chash()).unwrap();
        assert_eq!(result.lines.len(), 10);
        assert_eq!(result.lines[0], "0\t4,1,3");
    }

    #[test]
    fn test_ring() {
        let result = Command::Ring.execute(&chash()).unwrap();
        assert_eq!(
            result.lines,
            vec!["3\tprev=1\tnext=4", "4\tprev=3\tnext=1", "1\tprev=4\tnext=3"]
        );
    }

    #[test]
    fn test_lookup_and_load() {
        let chash = chash();
        let lookup = Command::Lookup {
            keys: vec!["user:42".into()],
        }
        .execute(&chash)
        .unwrap();
        assert!(lookup.lines[0].starts_with("user:42\t6\t"));

        let load = Command::Load.execute(&chash).unwrap();
        assert_eq!(load.lines.len(), 3);
        assert!(load.to_string().ends_with('\n'));
    }
}
