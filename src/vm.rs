//! VM records parsed from VBoxManage `list vms` output.
//!
//! Records are ephemeral: rebuilt from one parse pass over the tool's text
//! output on every list call, never persisted. The detailed (`-l`) format is
//! a sequence of `label: value` blocks, each opened by a `Name:` line; the
//! brief format is one quoted name per line.

use std::fmt;

use crate::error::VbxError;

/// Field labels retained from a detailed list block. Everything else the
/// tool prints (UUID, VRAM, boot order, ...) is ignored.
const VM_LIST_FIELDS: [&str; 5] = ["Name", "Guest OS", "Memory size", "Number of CPUs", "State"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmRecord {
    pub name: String,
    pub guest_os: String,
    pub memory_mb: u64,
    pub cpus: u32,
    pub state: String,
}

impl VmRecord {
    /// First whitespace token of the state field — VBoxManage appends a
    /// timestamp, e.g. `running (since 2024-01-01T10:00:00)`.
    pub fn state_token(&self) -> &str {
        self.state.split_whitespace().next().unwrap_or("")
    }
}

impl fmt::Display for VmRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} - {}MB RAM, {} CPUs",
            self.name,
            self.guest_os,
            self.state_token(),
            self.memory_mb,
            self.cpus
        )
    }
}

/// Parse brief `list vms` output: one VM per line, name is the first
/// whitespace token with exactly one pair of enclosing quotes stripped
/// (the rest of the line is the VM's UUID).
pub fn parse_brief(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(|token| strip_quotes(token).to_string())
        .collect()
}

fn strip_quotes(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

/// Parse detailed `list vms -l` output into records.
///
/// A record is only ever constructed from a `Name:` header line followed by
/// known-field lines until the next `Name:` line or end of output; lines
/// before the first header are ignored. A block missing any required field
/// is a hard error rather than a partial record.
pub fn parse_detailed(output: &str) -> Result<Vec<VmRecord>, VbxError> {
    let mut blocks: Vec<Block> = Vec::new();

    for line in output.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim();
        let value = value.trim();

        if label == "Name" {
            blocks.push(Block::new(value));
        } else if let Some(block) = blocks.last_mut() {
            if VM_LIST_FIELDS.contains(&label) {
                block.set(label, value);
            }
        }
    }

    blocks.into_iter().map(Block::into_record).collect()
}

/// Fields collected for one `Name:`-delimited block, finalized into a
/// `VmRecord` once the block ends.
struct Block {
    name: String,
    guest_os: Option<String>,
    memory: Option<String>,
    cpus: Option<String>,
    state: Option<String>,
}

impl Block {
    fn new(name: &str) -> Self {
        Block {
            name: name.to_string(),
            guest_os: None,
            memory: None,
            cpus: None,
            state: None,
        }
    }

    fn set(&mut self, label: &str, value: &str) {
        let slot = match label {
            "Guest OS" => &mut self.guest_os,
            "Memory size" => &mut self.memory,
            "Number of CPUs" => &mut self.cpus,
            "State" => &mut self.state,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn into_record(self) -> Result<VmRecord, VbxError> {
        let name = self.name;
        let take = |field: Option<String>, label: &str| {
            field.ok_or_else(|| VbxError::ParseVmList {
                message: format!("VM '{name}' is missing field '{label}'"),
            })
        };

        let guest_os = take(self.guest_os, "Guest OS")?;
        let memory = take(self.memory, "Memory size")?;
        let cpus = take(self.cpus, "Number of CPUs")?;
        let state = take(self.state, "State")?;

        let memory_mb = parse_leading_u64(&memory).ok_or_else(|| VbxError::ParseVmList {
            message: format!("VM '{name}' has unparseable memory size '{memory}'"),
        })?;
        let cpus = cpus.parse().map_err(|_| VbxError::ParseVmList {
            message: format!("VM '{name}' has unparseable CPU count '{cpus}'"),
        })?;

        Ok(VmRecord {
            name,
            guest_os,
            memory_mb,
            cpus,
            state,
        })
    }
}

/// Parse the leading digits of a value like `2048MB`, dropping the unit.
fn parse_leading_u64(s: &str) -> Option<u64> {
    let digits = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return None,
        Some(i) => &s[..i],
        None => s,
    };
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_strips_one_quote_pair() {
        let output = "\"VM1\" {a3c-1}\n\"VM2\" {a3c-2}\n";
        assert_eq!(parse_brief(output), vec!["VM1", "VM2"]);
    }

    #[test]
    fn brief_strips_only_outer_quotes() {
        assert_eq!(parse_brief("\"\"odd\"\" {u}\n"), vec!["\"odd\""]);
    }

    #[test]
    fn brief_keeps_unquoted_tokens() {
        assert_eq!(parse_brief("plain {u}\n"), vec!["plain"]);
    }

    #[test]
    fn brief_empty_output() {
        assert!(parse_brief("").is_empty());
    }

    #[test]
    fn detailed_single_block() {
        let output = "\
Name:            VM1
Guest OS:        Linux
Memory size:     2048MB
Number of CPUs:  2
State:           running (since 2024-01-01T10:00:00)
";
        let records = parse_detailed(output).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "VM1");
        assert_eq!(records[0].guest_os, "Linux");
        assert_eq!(records[0].memory_mb, 2048);
        assert_eq!(records[0].cpus, 2);
        assert_eq!(records[0].state_token(), "running");
        assert_eq!(
            records[0].to_string(),
            "VM1 (Linux): running - 2048MB RAM, 2 CPUs"
        );
    }

    #[test]
    fn detailed_ignores_unknown_fields() {
        let output = "\
Name:            VM1
UUID:            deadbeef
Guest OS:        Linux
VRAM size:       16MB
Memory size:     1024MB
Number of CPUs:  1
State:           powered off (since 2024-01-01T10:00:00)
";
        let records = parse_detailed(output).unwrap();
        assert_eq!(records[0].memory_mb, 1024);
        assert_eq!(records[0].state_token(), "powered");
    }

    #[test]
    fn detailed_preserves_block_order() {
        let output = "\
Name: B
Guest OS: Linux
Memory size: 512MB
Number of CPUs: 1
State: running (x)
Name: A
Guest OS: Windows
Memory size: 4096MB
Number of CPUs: 4
State: saved (x)
";
        let records = parse_detailed(output).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn detailed_ignores_lines_before_first_name() {
        let output = "\
Guest OS: stray
Name: VM1
Guest OS: Linux
Memory size: 2048MB
Number of CPUs: 2
State: running (x)
";
        let records = parse_detailed(output).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].guest_os, "Linux");
    }

    #[test]
    fn detailed_missing_field_fails() {
        let output = "\
Name: VM1
Guest OS: Linux
State: running (x)
";
        let err = parse_detailed(output).unwrap_err();
        assert!(matches!(err, VbxError::ParseVmList { .. }));
        assert!(err.to_string().contains("Memory size"));
    }

    #[test]
    fn detailed_bad_memory_fails() {
        let output = "\
Name: VM1
Guest OS: Linux
Memory size: lots
Number of CPUs: 2
State: running (x)
";
        let err = parse_detailed(output).unwrap_err();
        assert!(err.to_string().contains("memory size"));
    }

    #[test]
    fn leading_u64_drops_unit() {
        assert_eq!(parse_leading_u64("2048MB"), Some(2048));
        assert_eq!(parse_leading_u64("512"), Some(512));
        assert_eq!(parse_leading_u64("MB"), None);
        assert_eq!(parse_leading_u64(""), None);
    }
}
