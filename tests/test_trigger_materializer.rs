//! Cron trigger materialization tests

use agentboard::model::{AgentStatus, Priority, TaskTemplate};
use agentboard::testing::BoardFixture;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn standup_template() -> TaskTemplate {
    TaskTemplate {
        title: "Standup {{date}}".to_string(),
        description: "Notes for {{date}}".to_string(),
        priority: None,
        assigned_agent_id: None,
    }
}

#[test]
fn test_trigger_appends_rendered_task() {
    let fx = BoardFixture::new();
    let existing = fx.task(fx.todo, "already here");
    let job = {
        let guard = fx.engine.store().lock();
        guard
            .create_cron_job("standup", "0 9 * * *", true, None, Some(fx.todo), Some(&standup_template()))
            .unwrap()
    };

    let at = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
    let outcome = fx.engine.trigger_cron_job_at(job.id, at).unwrap();

    assert!(outcome.task_created);
    let summary = outcome.task.unwrap();
    assert_eq!(summary.task.title, "Standup Jan 5, 2025");
    assert_eq!(summary.task.description, "Notes for Jan 5, 2025");
    assert_eq!(summary.task.position, 1);
    assert_eq!(summary.column_name, "Todo");
    assert_eq!(summary.board_name, "main");
    assert_eq!(summary.project_name, "orchestrator");

    let positions = fx.positions(fx.todo);
    assert_eq!(positions[0].0, existing);
    assert_eq!(positions.len(), 2);

    let reloaded = fx.engine.store().lock().get_cron_job(job.id).unwrap().unwrap();
    assert_eq!(reloaded.last_run_at, Some(at));
}

#[test]
fn test_trigger_without_template_is_heartbeat_only() {
    let fx = BoardFixture::new();
    let job = {
        let guard = fx.engine.store().lock();
        guard
            .create_cron_job("ping", "*/5 * * * *", true, None, None, None)
            .unwrap()
    };

    let outcome = fx.engine.trigger_cron_job(job.id).unwrap();
    assert!(!outcome.task_created);
    assert!(outcome.task.is_none());

    let reloaded = fx.engine.store().lock().get_cron_job(job.id).unwrap().unwrap();
    assert!(reloaded.last_run_at.is_some());
    assert!(fx.positions(fx.todo).is_empty());
}

#[test]
fn test_template_without_target_column_is_heartbeat_only() {
    let fx = BoardFixture::new();
    let job = {
        let guard = fx.engine.store().lock();
        guard
            .create_cron_job("orphan", "0 0 * * *", true, None, None, Some(&standup_template()))
            .unwrap()
    };

    let outcome = fx.engine.trigger_cron_job(job.id).unwrap();
    assert!(!outcome.task_created);
}

#[test]
fn test_template_assignee_wins_over_job_default() {
    let fx = BoardFixture::new();
    let template_agent = fx.project_agent("template-agent", AgentStatus::Active);
    let default_agent = fx.project_agent("default-agent", AgentStatus::Active);

    let mut template = standup_template();
    template.assigned_agent_id = Some(template_agent);
    let job = {
        let guard = fx.engine.store().lock();
        guard
            .create_cron_job("standup", "0 9 * * *", true, Some(default_agent), Some(fx.todo), Some(&template))
            .unwrap()
    };

    let outcome = fx.engine.trigger_cron_job(job.id).unwrap();
    let task = outcome.task.unwrap().task;
    assert_eq!(task.assigned_agent_id, Some(template_agent));
}

#[test]
fn test_job_default_assignee_used_when_template_has_none() {
    let fx = BoardFixture::new();
    let default_agent = fx.project_agent("default-agent", AgentStatus::Active);
    let job = {
        let guard = fx.engine.store().lock();
        guard
            .create_cron_job("standup", "0 9 * * *", true, Some(default_agent), Some(fx.todo), Some(&standup_template()))
            .unwrap()
    };

    let outcome = fx.engine.trigger_cron_job(job.id).unwrap();
    assert_eq!(
        outcome.task.unwrap().task.assigned_agent_id,
        Some(default_agent)
    );
}

#[test]
fn test_template_priority_honored_with_medium_default() {
    let fx = BoardFixture::new();
    let mut template = standup_template();
    template.priority = Some(Priority::Urgent);
    let (urgent_job, default_job) = {
        let guard = fx.engine.store().lock();
        let urgent = guard
            .create_cron_job("urgent", "0 9 * * *", true, None, Some(fx.todo), Some(&template))
            .unwrap();
        let plain = guard
            .create_cron_job("plain", "0 9 * * *", true, None, Some(fx.todo), Some(&standup_template()))
            .unwrap();
        (urgent, plain)
    };

    let urgent = fx.engine.trigger_cron_job(urgent_job.id).unwrap();
    assert_eq!(urgent.task.unwrap().task.priority, Priority::Urgent);

    let plain = fx.engine.trigger_cron_job(default_job.id).unwrap();
    assert_eq!(plain.task.unwrap().task.priority, Priority::Medium);
}

#[test]
fn test_repeated_triggers_keep_appending() {
    let fx = BoardFixture::new();
    let job = {
        let guard = fx.engine.store().lock();
        guard
            .create_cron_job("standup", "0 9 * * *", true, None, Some(fx.todo), Some(&standup_template()))
            .unwrap()
    };

    for expected in 0..3 {
        let outcome = fx.engine.trigger_cron_job(job.id).unwrap();
        assert_eq!(outcome.task.unwrap().task.position, expected);
    }
    let positions: Vec<i64> = fx.positions(fx.todo).iter().map(|&(_, p)| p).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[test]
fn test_missing_cron_job_is_not_found() {
    let fx = BoardFixture::new();
    let err = fx.engine.trigger_cron_job(Uuid::new_v4()).unwrap_err();
    assert!(err.is_not_found());
}
