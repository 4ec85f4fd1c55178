pub mod monitor_transitions;
