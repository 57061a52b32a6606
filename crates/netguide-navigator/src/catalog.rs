//! Built-in troubleshooting trees

use crate::definition::{StepDefinition, StepTable, DEFAULT_ROOT};
use crate::loader::StaticSource;

/// Home network troubleshooting guide rooted at `"start"`
///
/// `router-check` offers a way back to `start`, so the tree contains a cycle.
#[must_use]
pub fn network_troubleshooting() -> StepTable {
    StepTable::new(network_steps()).with_root(DEFAULT_ROOT)
}

/// [`network_troubleshooting`] as a [`StaticSource`]
#[must_use]
pub fn network_source() -> StaticSource {
    StaticSource::new("built-in network guide", network_troubleshooting())
}

fn network_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::question("start", "What type of network issue are you experiencing?")
            .with_description("Select the option that best describes your current network problem.")
            .with_option("opt1", "Cannot connect to the internet", "internet-issue")
            .with_option("opt2", "Slow connection speeds", "slow-connection")
            .with_option("opt3", "Intermittent connectivity", "intermittent")
            .with_option("opt4", "Wi-Fi signal problems", "wifi-signal")
            .with_option("opt5", "Device-specific connection issues", "device-specific"),
        StepDefinition::question("internet-issue", "Internet Connection Troubleshooting")
            .with_description("Let's check your basic connection status.")
            .with_option("opt1", "My router/modem lights are off or flashing red", "router-power")
            .with_option("opt2", "My router/modem lights are normal", "router-restart")
            .with_option("opt3", "I'm not sure", "router-check"),
        StepDefinition::solution(
            "router-power",
            "Power Issue Detected",
            "Check that your router and modem are properly plugged in. Verify that the power \
             outlet is working by plugging in another device. If the power is fine but the \
             device still won't power on, the router/modem may be faulty and need replacement.",
        )
        .with_description("Your router or modem may have a power issue."),
        StepDefinition::solution(
            "router-restart",
            "Try Restarting Your Router",
            "1. Unplug your router and modem from power\n\
             2. Wait 30 seconds\n\
             3. Plug in your modem and wait for it to fully boot (usually 1-2 minutes)\n\
             4. Plug in your router and wait for it to fully boot (usually 1-2 minutes)\n\
             5. Test your connection again",
        )
        .with_description("A simple restart often resolves many connection issues."),
        StepDefinition::question("router-check", "Check Your Router Lights")
            .with_description(
                "Look at the front of your router and modem. The power and internet lights \
                 should be solid green or white.",
            )
            .with_option("opt1", "The lights are off or red", "router-power")
            .with_option("opt2", "The lights look normal", "router-restart")
            .with_option("opt3", "I still can't tell, start over", "start"),
        StepDefinition::question("slow-connection", "Slow Connection Troubleshooting")
            .with_description("Let's identify what might be causing your slow connection.")
            .with_option("opt1", "It's slow on all devices", "all-devices-slow")
            .with_option("opt2", "It's only slow on one device", "one-device-slow")
            .with_option("opt3", "It's slow at certain times of day", "peak-hours"),
        StepDefinition::solution(
            "all-devices-slow",
            "Network-Wide Slow Connection",
            "1. Run a speed test to verify your current speeds\n\
             2. Restart your router and modem\n\
             3. Check if you're experiencing network congestion during peak hours\n\
             4. Contact your ISP to verify there are no outages or issues in your area\n\
             5. Consider upgrading your internet plan if you consistently need more bandwidth",
        )
        .with_description("The issue affects your entire network."),
        StepDefinition::solution(
            "one-device-slow",
            "Single Device Slow Connection",
            "1. Restart the affected device\n\
             2. Move it closer to the router or use a wired connection\n\
             3. Close background downloads and updates\n\
             4. Update the network adapter drivers or operating system\n\
             5. Forget the Wi-Fi network and reconnect",
        )
        .with_description("The problem is limited to one device."),
        StepDefinition::solution(
            "peak-hours",
            "Peak Hour Congestion",
            "Slowdowns at specific times usually mean congestion on your ISP's network or \
             heavy use inside your home. Schedule large downloads outside busy hours, enable \
             QoS on your router to prioritise important traffic, and ask your ISP whether \
             your area is oversubscribed.",
        )
        .with_description("Speeds drop during busy periods."),
        StepDefinition::error(
            "intermittent",
            "Intermittent Connection Issues",
            "Intermittent connection issues can be difficult to diagnose. Common causes include:\n\n\
             - Wireless interference from other devices\n\
             - Router overheating\n\
             - Outdated router firmware\n\
             - ISP network problems\n\
             - Physical connection problems\n\n\
             Try updating your router firmware, checking for interference sources, and \
             monitoring when the issues occur to identify patterns.",
        )
        .with_description("Let's troubleshoot your inconsistent connection."),
        StepDefinition::question("wifi-signal", "Wi-Fi Signal Troubleshooting")
            .with_description("Let's find out why your wireless signal is weak.")
            .with_option("opt1", "The signal is weak far from the router", "wifi-range")
            .with_option("opt2", "The signal drops when other devices are in use", "wifi-interference"),
        StepDefinition::solution(
            "wifi-range",
            "Extend Your Wi-Fi Coverage",
            "1. Place the router in a central, elevated spot away from walls\n\
             2. Keep it clear of metal objects and appliances\n\
             3. Add a mesh node or range extender for distant rooms\n\
             4. Use the 2.4 GHz band for range and 5 GHz for speed",
        )
        .with_description("Coverage drops off with distance from the router."),
        StepDefinition::solution(
            "wifi-interference",
            "Reduce Wireless Interference",
            "1. Change the router's Wi-Fi channel to a less crowded one\n\
             2. Move the router away from microwaves, cordless phones and baby monitors\n\
             3. Switch capable devices to the 5 GHz band\n\
             4. Update the router firmware",
        )
        .with_description("Other devices are competing for the same radio channel."),
        StepDefinition::error(
            "device-specific",
            "Device-Specific Connection Issues",
            "When only one device cannot connect, the cause is usually its own configuration:\n\n\
             - Network adapter disabled or in airplane mode\n\
             - Stale IP address or DNS cache\n\
             - MAC address filtering on the router\n\
             - Outdated drivers\n\n\
             Renew the device's IP address, flush its DNS cache, check the router's access \
             control list, and run the network diagnostics tools.",
        )
        .with_description("Only some devices are affected."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepId;
    use crate::validation::{TreeValidator, ValidationContext};

    #[test]
    fn network_guide_is_valid() {
        let tree = TreeValidator::new()
            .validate_table(&network_troubleshooting(), None)
            .unwrap();
        let report = tree.report();
        assert_eq!(report.root, StepId::from("start"));
        assert!(report.unreachable.is_empty());
        assert!(report.has_cycle);
        assert_eq!(report.step_count, 14);
    }

    #[test]
    fn network_guide_loops_only_through_router_check() {
        let err = TreeValidator::with_context(ValidationContext::rejecting_cycles())
            .validate_table(&network_troubleshooting(), None)
            .unwrap_err();
        let on_cycle = err.step_id().as_str();
        assert!(["start", "internet-issue", "router-check"].contains(&on_cycle));
    }
}
