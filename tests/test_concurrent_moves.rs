//! Concurrent move serialization tests
//!
//! Two concurrent moves into the same column must not both land on the same
//! position; each operation's read-shift-write sequence is one critical
//! section, so exactly one interleaving results and density survives.

use std::sync::Arc;
use std::thread;

use agentboard::testing::BoardFixture;
use uuid::Uuid;

fn dense_positions(fx: &BoardFixture, column: Uuid) -> Vec<i64> {
    fx.positions(column).iter().map(|&(_, p)| p).collect()
}

#[test]
fn test_concurrent_inserts_at_head_of_same_column() {
    let fx = Arc::new(BoardFixture::new());
    let t1 = fx.task(fx.ideas, "T1");
    let t2 = fx.task(fx.ideas, "T2");
    fx.task(fx.done, "resident");

    let handles: Vec<_> = [t1, t2]
        .into_iter()
        .map(|task_id| {
            let fx = Arc::clone(&fx);
            thread::spawn(move || fx.engine.move_task(task_id, fx.done, 0).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tasks = fx.positions(fx.done);
    assert_eq!(tasks.len(), 3);
    assert_eq!(dense_positions(&fx, fx.done), vec![0, 1, 2]);
    // Exactly one of the two movers won position 0.
    let at_zero: Vec<Uuid> = tasks
        .iter()
        .filter(|&&(id, p)| p == 0 && (id == t1 || id == t2))
        .map(|&(id, _)| id)
        .collect();
    assert_eq!(at_zero.len(), 1);
    assert!(fx.positions(fx.ideas).is_empty());
}

#[test]
fn test_many_threads_churning_one_board() {
    let fx = Arc::new(BoardFixture::new());
    let tasks: Vec<Uuid> = (0..8).map(|i| fx.task(fx.ideas, &format!("t{i}"))).collect();

    let handles: Vec<_> = tasks
        .iter()
        .enumerate()
        .map(|(i, &task_id)| {
            let fx = Arc::clone(&fx);
            thread::spawn(move || {
                let dest = if i % 2 == 0 { fx.todo } else { fx.done };
                fx.engine.move_task(task_id, dest, (i % 3) as i64).unwrap();
                fx.engine.move_task(task_id, fx.ideas, 0).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(dense_positions(&fx, fx.ideas), vec![0, 1, 2, 3, 4, 5, 6, 7]);
    assert!(fx.positions(fx.todo).is_empty());
    assert!(fx.positions(fx.done).is_empty());
}
