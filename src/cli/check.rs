//! Story validation for `biringan check`

use crate::story::StorySummary;

/// Parse a story document and return its summary
pub fn run_check(markdown: &str) -> anyhow::Result<StorySummary> {
    let story = crate::parser::parse(markdown)?;
    let summary = story.summary();

    if let Some(title) = &story.title {
        println!("{}", title);
    }
    println!("entry:       {}", story.entry);
    println!("scripts:     {}", summary.scripts);
    println!("lines:       {}", summary.lines);
    println!("menus:       {}", summary.menus);
    println!("choices:     {}", summary.choices);
    println!("triggers:    {}", summary.triggers);
    println!("checkpoints: {}", summary.checkpoints);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_counts() {
        let md = "[START script=a]\n[SCRIPT name=a]\n[SAY speaker=A checkpoint=c]\nhi\n[ON checkpoint=c cue=ECH1]\n";
        let summary = run_check(md).unwrap();
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.triggers, 1);
        assert_eq!(summary.checkpoints, 1);
    }

    #[test]
    fn test_check_fails_on_invalid_story() {
        let err = run_check("[SCRIPT name=a]\n").unwrap_err();
        assert!(err.to_string().contains("START"));
    }
}
