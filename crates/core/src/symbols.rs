//! Packet-id symbol table.
//!
//! Accelerator builds emit a C header mapping symbolic packet names to
//! small integer routing ids (`#define DataInFP_A_0 3`). The table is a
//! build artifact: when it has not been generated yet, every packet name
//! falls back to id 0 so vector generation still works, with a warning
//! so the ids can be regenerated before a hardware run.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::error::Result;

/// Parse `#define <name> <decimal id>` lines; anything else is ignored.
pub fn parse_packet_ids(text: &str) -> HashMap<String, u32> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let mut parts = line.trim().split_whitespace();
        if parts.next() != Some("#define") {
            continue;
        }
        let (Some(name), Some(id)) = (parts.next(), parts.next()) else {
            continue;
        };
        if let Ok(id) = id.parse::<u32>() {
            map.insert(name.to_string(), id);
        }
    }
    map
}

/// Load the symbol table from a build artifact.
pub fn load_packet_ids(path: &Path) -> Result<HashMap<String, u32>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_packet_ids(&text))
}

/// Load the first table that exists among `candidates`.
///
/// No table anywhere is not an error: generation degrades to id 0 for
/// every packet name, with a diagnostic.
pub fn load_first(candidates: &[&Path]) -> HashMap<String, u32> {
    for candidate in candidates {
        if candidate.exists() {
            match load_packet_ids(candidate) {
                Ok(map) => return map,
                Err(err) => {
                    warn!(path = %candidate.display(), error = %err, "failed to read packet-id table")
                }
            }
        }
    }
    warn!("no packet-id table found; packet names default to id 0");
    HashMap::new()
}

/// Resolve a packet name, defaulting to 0 when absent.
pub fn resolve(map: &HashMap<String, u32>, name: &str) -> u32 {
    match map.get(name) {
        Some(id) => *id,
        None => {
            warn!(name, "packet name not in id table; defaulting to 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_define_lines() {
        let text = "// generated\n#define DataInFP_A_0 3\n#define DataInFP_B_0 4\n#ifndef GUARD\n";
        let map = parse_packet_ids(text);
        assert_eq!(map.get("DataInFP_A_0"), Some(&3));
        assert_eq!(map.get("DataInFP_B_0"), Some(&4));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_resolve_defaults_to_zero() {
        let map = parse_packet_ids("#define X 7");
        assert_eq!(resolve(&map, "X"), 7);
        assert_eq!(resolve(&map, "missing"), 0);
    }

    #[test]
    fn test_load_first_missing_everywhere() {
        let map = load_first(&[Path::new("/nonexistent/packet_ids_c.h")]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_non_numeric_ids_ignored() {
        let map = parse_packet_ids("#define NAME notanum\n#define OK 2");
        assert_eq!(map.get("NAME"), None);
        assert_eq!(map.get("OK"), Some(&2));
    }
}
