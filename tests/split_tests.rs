use std::fs;

use component_rewriter::config::{CategoryGroup, Config};
use component_rewriter::parser::{import_block, locate};
use component_rewriter::pass::{run_split, write_split, ComponentState, Operation};
use component_rewriter::rewrite::{build_category_file, extract, extract_with_docs};
use component_rewriter::LocateError;

const AMBIENT: &str = r#"import React, { useRef } from 'react';
import { useFrame } from '@react-three/fiber';

// Warning sign with reflective border
const SafetySign: React.FC<{ text: string }> = ({ text }) => (
  <group>
    <Text>{text}</Text>
  </group>
);

const Pigeon: React.FC = () => {
  const ref = useRef(null);
  useFrame((state) => {
    ref.current.position.y = Math.sin(state.clock.elapsedTime) * 0.1;
  });
  return <mesh ref={ref} />;
};

/**
 * Dusty web in a corner.
 */
const Cobweb = ({ size }: { size: number }) => {
  const note = `web ${size > 1 ? '{big}' : 'small'}`;
  return <mesh scale={size} name={note} />;
};

export default function AmbientDetails() {
  return null;
}
"#;

const SAFETY_SIGN: &str = r#"const SafetySign: React.FC<{ text: string }> = ({ text }) => (
  <group>
    <Text>{text}</Text>
  </group>
);"#;

fn config_with(categories: Vec<CategoryGroup>) -> Config {
    Config {
        categories,
        ..Config::default()
    }
}

#[cfg(test)]
mod extract_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_spans_header_to_terminator() {
        assert_eq!(extract(AMBIENT, "SafetySign").unwrap(), SAFETY_SIGN);
    }

    #[test]
    fn test_extract_with_docs_carries_leading_comments() {
        let text = extract_with_docs(AMBIENT, "Cobweb").unwrap();
        assert!(text.starts_with("/**\n * Dusty web in a corner.\n */\nconst Cobweb = "));
        assert!(text.ends_with("name={note} />;\n};"));
    }

    #[test]
    fn test_extract_then_reinsert_reproduces_source() {
        for name in ["SafetySign", "Pigeon", "Cobweb"] {
            let bounds = locate(AMBIENT, name).unwrap();
            let text = extract(AMBIENT, name).unwrap().to_string();

            let mut rebuilt = AMBIENT.to_string();
            rebuilt.replace_range(bounds.header_start..bounds.end, "");
            rebuilt.insert_str(bounds.header_start, &text);

            assert_eq!(rebuilt, AMBIENT, "{name}");
        }
    }

    #[test]
    fn test_extract_missing_component() {
        assert_eq!(
            extract(AMBIENT, "EyeWashStation"),
            Err(LocateError::NotFound {
                name: "EyeWashStation".to_string()
            })
        );
    }

    #[test]
    fn test_import_block_is_leading_imports() {
        assert_eq!(
            import_block(AMBIENT),
            "import React, { useRef } from 'react';\nimport { useFrame } from '@react-three/fiber';\n"
        );
    }
}

#[cfg(test)]
mod category_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_group_contains_only_found_components() {
        let group = CategoryGroup::new("Safety.out", &["SafetySign", "EyeWashStation"], "Safety equipment");
        let file = build_category_file(AMBIENT, import_block(AMBIENT), &group);

        let expected = format!(
            "{}\n// Safety equipment\n\n// Warning sign with reflective border\n{}\n",
            import_block(AMBIENT),
            SAFETY_SIGN
        );
        assert_eq!(file.content, expected);
        assert_eq!(file.found, vec!["SafetySign".to_string()]);
        assert_eq!(file.total, 2);
        assert_eq!(file.missing[0].name(), "EyeWashStation");
        assert!(file.is_partial());
        assert!(file.should_write());
    }

    #[test]
    fn test_components_follow_manifest_order() {
        let group = CategoryGroup::new("Mixed.tsx", &["Cobweb", "Pigeon"], "Mixed");
        let file = build_category_file(AMBIENT, import_block(AMBIENT), &group);

        let cobweb = file.content.find("const Cobweb").unwrap();
        let pigeon = file.content.find("const Pigeon").unwrap();
        assert!(cobweb < pigeon);
        assert_eq!(file.found_count(), 2);
        assert!(!file.is_partial());
    }

    #[test]
    fn test_split_summary_reports_counts() {
        let config = config_with(vec![
            CategoryGroup::new("Safety.out", &["SafetySign", "EyeWashStation"], "Safety equipment"),
            CategoryGroup::new("AmbientLife.tsx", &["Pigeon", "Mouse"], "Ambient creatures"),
            CategoryGroup::new("Empty.tsx", &["Nothing", "Nowhere"], "Nothing here"),
        ]);
        let (files, summary) = run_split(AMBIENT, &config);

        assert_eq!(files.len(), 3);
        let safety = summary.category("Safety.out").unwrap();
        assert_eq!((safety.found, safety.total, safety.written), (1, 2, true));
        assert_eq!(safety.missing, vec!["EyeWashStation".to_string()]);

        let empty = summary.category("Empty.tsx").unwrap();
        assert_eq!((empty.found, empty.written), (0, false));

        let extract = summary.tally(Operation::Extract);
        assert_eq!((extract.succeeded, extract.skipped, extract.failed), (2, 4, 0));
        assert_eq!(summary.components.get("Pigeon"), Some(&ComponentState::Done));

        let report = summary.to_string();
        assert!(report.contains("Safety.out"));
        assert!(report.contains("1/2 extracted"));
        assert!(report.contains("0/2 extracted (not written)"));
        assert!(report.contains("[warning] Safety.out (extract): partial extraction: 1/2 components"));
        assert!(report.contains("[warning] EyeWashStation (extract): component 'EyeWashStation' not found"));
    }

    #[test]
    fn test_unbalanced_component_is_a_failure() {
        let src = "import React from 'react';\n\nconst Loose = () => {\n  return <mesh />;\n\nconst Tight = () => <mesh />;\n";
        let config = config_with(vec![CategoryGroup::new("Props.tsx", &["Loose"], "Props")]);
        let (files, summary) = run_split(src, &config);

        assert!(!files[0].should_write());
        assert_eq!(summary.tally(Operation::Extract).failed, 1);
        assert_eq!(summary.components.get("Loose"), Some(&ComponentState::Failed));
        assert!(summary.has_failures());
    }

    #[test]
    fn test_write_split_skips_empty_groups() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("ambient");
        let config = config_with(vec![
            CategoryGroup::new("Safety.out", &["SafetySign", "EyeWashStation"], "Safety equipment"),
            CategoryGroup::new("Empty.tsx", &["Nothing"], "Nothing here"),
        ]);
        let (files, _) = run_split(AMBIENT, &config);

        let written = write_split(&out_dir, &files).unwrap();

        assert_eq!(written, 1);
        let safety = fs::read_to_string(out_dir.join("Safety.out")).unwrap();
        assert_eq!(safety, files[0].content);
        assert!(!out_dir.join("Empty.tsx").exists());
    }
}
