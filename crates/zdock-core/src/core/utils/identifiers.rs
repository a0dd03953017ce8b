use phf::{Set, phf_set};

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "N", "CA", "C", "O",
};

const COMPONENT_CHAIN_IDS: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub fn is_backbone_atom(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(atom_name.trim())
}

/// Chain identifier assigned to the `index`-th component of an assembled multimer.
///
/// Upper-case letters come first, then lower-case; `None` past the 52nd component.
pub fn component_chain_id(index: usize) -> Option<char> {
    COMPONENT_CHAIN_IDS.get(index).map(|&b| b as char)
}

pub fn max_component_chains() -> usize {
    COMPONENT_CHAIN_IDS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_backbone_atom_recognizes_heavy_backbone_atoms() {
        assert!(is_backbone_atom("N"));
        assert!(is_backbone_atom("CA"));
        assert!(is_backbone_atom("C"));
        assert!(is_backbone_atom("O"));
    }

    #[test]
    fn is_backbone_atom_trims_whitespace_and_is_case_sensitive() {
        assert!(is_backbone_atom(" CA "));
        assert!(!is_backbone_atom("ca"));
        assert!(!is_backbone_atom("CB"));
        assert!(!is_backbone_atom("OXT"));
        assert!(!is_backbone_atom(""));
    }

    #[test]
    fn component_chain_id_runs_upper_then_lower_case() {
        assert_eq!(component_chain_id(0), Some('A'));
        assert_eq!(component_chain_id(25), Some('Z'));
        assert_eq!(component_chain_id(26), Some('a'));
        assert_eq!(component_chain_id(51), Some('z'));
        assert_eq!(component_chain_id(52), None);
        assert_eq!(max_component_chains(), 52);
    }
}
