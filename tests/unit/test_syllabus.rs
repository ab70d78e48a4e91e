//! Unit tests for the compiled-in course syllabus

use ceh_coach::prompts;
use ceh_coach::syllabus::{self, find_module, modules};

#[test]
fn test_twelve_modules_in_order() {
    let ids: Vec<u32> = modules().iter().map(|m| m.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn test_every_module_is_complete() {
    for module in modules() {
        assert!(!module.title.is_empty());
        assert!(!module.duration.is_empty());
        assert!(!module.subtopics.is_empty(), "module {} has no subtopics", module.id);
        assert!(!module.outcomes.is_empty(), "module {} has no outcomes", module.id);
        for sub in module.subtopics {
            assert!(!sub.title.is_empty());
            assert!(sub.time.ends_with("min"));
        }
    }
}

#[test]
fn test_subtopic_titles_unique_within_module() {
    for module in modules() {
        let mut titles: Vec<&str> = module.subtopics.iter().map(|s| s.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), module.subtopics.len());
    }
}

#[test]
fn test_lookup_by_id() {
    assert_eq!(
        find_module(9).map(|m| m.title),
        Some("Social Engineering and Session Hijacking")
    );
    assert!(find_module(0).is_none());
    assert!(find_module(13).is_none());
}

#[test]
fn test_context_embedded_in_system_instruction() {
    let context = syllabus::system_context();
    let instruction = prompts::system_instruction(&context);

    assert!(instruction.contains(&context));
    for module in modules() {
        assert!(context.contains(&format!("Module {}: {}", module.id, module.title)));
    }
    assert!(context.contains("- Nmap Mastery ("));
}
