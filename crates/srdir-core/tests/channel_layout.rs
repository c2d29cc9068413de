//! Numbering properties of the channel layout resolver.

use srdir_core::{Channel, ChannelLayout, ChannelType};

/// Build `logic` logic channels (the first `enabled_logic` enabled) followed by
/// `analog` analog channels where every channel at an odd position is disabled.
fn build_channels(logic: usize, enabled_logic: usize, analog: usize) -> Vec<Channel> {
    let mut channels = Vec::new();
    for i in 0..logic {
        channels.push(Channel::logic(i, format!("D{}", i)).with_enabled(i < enabled_logic));
    }
    for j in 0..analog {
        channels.push(Channel::analog(logic + j, format!("A{}", j)).with_enabled(j % 2 == 0));
    }
    channels
}

#[test]
fn test_first_analog_number_for_all_small_layouts() {
    for logic in 0..=10 {
        for enabled_logic in 0..=logic {
            for analog in 0..=5 {
                let channels = build_channels(logic, enabled_logic, analog);
                let layout = ChannelLayout::resolve(&channels);
                let enabled_analog = analog.div_ceil(2);

                let expected_first = if enabled_logic > 0 { logic + 1 } else { 1 };
                assert_eq!(layout.first_analog_number, expected_first);
                assert_eq!(layout.enabled_analog_channel_count, enabled_analog);
                assert_eq!(layout.analog_index_map.len(), enabled_analog);

                let analog_numbers: Vec<usize> = layout
                    .channels
                    .iter()
                    .filter(|c| c.channel_type == ChannelType::Analog)
                    .map(|c| c.number)
                    .collect();
                let expected: Vec<usize> =
                    (expected_first..expected_first + enabled_analog).collect();
                assert_eq!(analog_numbers, expected);
            }
        }
    }
}

#[test]
fn test_index_map_preserves_declaration_order() {
    let channels = vec![
        Channel::analog(7, "late"),
        Channel::logic(0, "D0"),
        Channel::analog(2, "early"),
    ];
    let layout = ChannelLayout::resolve(&channels);

    assert_eq!(layout.analog_index_map, vec![7, 2]);
    assert_eq!(layout.analog_slot(7), Some(0));
    assert_eq!(layout.analog_slot(2), Some(1));
    assert_eq!(layout.first_analog_number, 2);
}
