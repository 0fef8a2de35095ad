//! Default generator entry points
//!
//! The default generator derives its node ID from the host's private IPv4
//! address and terminates the process when it cannot. Fatal paths run in a
//! child copy of this test binary so the exit status can be observed.

#[cfg(test)]
mod tests {
    use crate::default::terminate;
    use crate::tests::test_utils::epoch_2020;
    use crate::*;
    use std::process::{Command, Output};

    const CHILD_ENV: &str = "SLOTID_DEFAULT_CHILD";

    fn host_has_private_ipv4() -> bool {
        PrivateIpv4.node_id().is_ok()
    }

    /// True inside the child process started for `name`
    fn is_child(name: &str) -> bool {
        std::env::var(CHILD_ENV).is_ok_and(|v| v == name)
    }

    /// Re-run this test binary, executing only the test `name`
    fn run_child(name: &str) -> Output {
        let exe = std::env::current_exe().unwrap();
        let filter = format!("tests::default_tests::tests::{name}");
        Command::new(exe)
            .args([
                filter.as_str(),
                "--exact",
                "--nocapture",
                "--test-threads=1",
            ])
            .env(CHILD_ENV, name)
            .output()
            .unwrap()
    }

    #[test]
    fn test_decompose_uses_default_epoch() {
        let parts = decompose(SlotID::compose(12, 5, 1));
        assert_eq!(parts.timestamp, epoch_2020() + chrono::TimeDelta::milliseconds(120));
        assert_eq!(parts.slots_since_epoch, 12);
        assert_eq!(parts.node_id, 5);
        assert_eq!(parts.sequence, 1);
        assert_eq!(decompose(0).timestamp, SlotIDConfig::default().epoch());
    }

    #[test]
    fn child_terminate() {
        if is_child("child_terminate") {
            terminate("forced failure", &SlotIDError::node_id("offline"));
        }
    }

    #[test]
    fn child_new_id() {
        if is_child("child_new_id") {
            let id = new_id();
            println!("minted {id}");
        }
    }

    #[test]
    fn test_terminate_exits_with_status_1() {
        let output = run_child("child_terminate");
        assert_eq!(output.status.code(), Some(1));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("slotid: forced failure"), "stderr: {stderr}");
        assert!(stderr.contains("offline"), "stderr: {stderr}");
    }

    #[test]
    fn test_default_entry_points() {
        if host_has_private_ipv4() {
            let a = new_id();
            let b = next_id().unwrap();
            assert!(b > a);

            let expected_node = PrivateIpv4.node_id().unwrap();
            assert_eq!(decompose(a).node_id, expected_node);
            assert_eq!(default_generator().node_id(), expected_node);
        } else {
            // Building the default generator must terminate the process
            let output = run_child("child_new_id");
            assert_eq!(output.status.code(), Some(1));

            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(
                stderr.contains("failed to build the default slot id generator"),
                "stderr: {stderr}"
            );
        }
    }
}
