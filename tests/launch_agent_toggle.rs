use rambar::launch_agent::{LAUNCH_AGENT_LABEL, LaunchAgent};

#[test]
fn toggle_on_then_off_tracks_descriptor_existence() {
    let dir = std::env::temp_dir().join("rambar_it_agents_toggle");
    let _ = std::fs::remove_dir_all(&dir);

    let agent = LaunchAgent::at_dir(&dir);
    assert!(!agent.is_enabled());

    agent.set_enabled(true);
    assert!(agent.is_enabled());

    let plist_path = dir.join(format!("{LAUNCH_AGENT_LABEL}.plist"));
    let contents = std::fs::read_to_string(&plist_path).unwrap();
    assert!(contents.contains(LAUNCH_AGENT_LABEL));
    assert!(contents.contains("<key>RunAtLoad</key>"));
    assert!(contents.contains("<key>KeepAlive</key>"));
    // ProgramArguments points at the running executable
    assert!(contents.contains("<key>ProgramArguments</key>"));

    agent.set_enabled(false);
    assert!(!agent.is_enabled());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn enabling_twice_is_idempotent() {
    let dir = std::env::temp_dir().join("rambar_it_agents_idempotent");
    let _ = std::fs::remove_dir_all(&dir);

    let agent = LaunchAgent::at_dir(&dir);
    agent.set_enabled(true);
    agent.set_enabled(true);
    assert!(agent.is_enabled());

    let _ = std::fs::remove_dir_all(&dir);
}
