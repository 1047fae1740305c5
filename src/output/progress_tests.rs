use super::*;

#[test]
fn hidden_progress_still_counts() {
    let progress = ScanProgress::hidden();
    progress.inc();
    progress.inc();
    progress.finish();

    assert_eq!(progress.count(), 2);
}

#[test]
fn quiet_mode_counts() {
    let progress = ScanProgress::new(true);

    for _ in 0..10 {
        progress.inc();
    }
    progress.finish();

    assert_eq!(progress.count(), 10);
}

#[test]
fn clones_share_the_counter() {
    let progress = ScanProgress::hidden();
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.count(), 2);
    progress.finish();
}

#[test]
fn visible_counter_can_be_driven_without_a_terminal() {
    let progress = ScanProgress::new_with_visibility(false, true);
    progress.inc();
    progress.finish();

    assert_eq!(progress.count(), 1);
}
