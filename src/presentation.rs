use crate::mixer::{ChannelKind, MixerReport};

const ICON_BASE_PLAYBACK: &str = "audio-volume";
const ICON_BASE_MICROPHONE: &str = "microphone-sensitivity";
const ICON_SUFFIXES: [&str; 4] = ["muted", "low", "medium", "high"];
const TITLE_PLAYBACK: &str = "Playback";
const TITLE_MICROPHONE: &str = "Microphone";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Presentation {
    pub(crate) title: &'static str,
    pub(crate) icon: String,
    pub(crate) body: String,
}

impl From<&MixerReport> for Presentation {
    fn from(report: &MixerReport) -> Self {
        let (title, base) = match report.channel_kind {
            ChannelKind::Playback => (TITLE_PLAYBACK, ICON_BASE_PLAYBACK),
            ChannelKind::Capture => (TITLE_MICROPHONE, ICON_BASE_MICROPHONE),
        };

        let suffix = if report.muted {
            ICON_SUFFIXES[0]
        } else {
            // 0..=33 low, 34..=67 medium, 68..=100 high
            let index = 1 + report.volume_percent.min(100) as usize / 34;
            ICON_SUFFIXES[index.min(ICON_SUFFIXES.len() - 1)]
        };

        let mut body = format!("Volume at {}%", report.volume_percent);
        if report.muted {
            body.push_str(" (muted)");
        }

        Self {
            title,
            icon: format!("{base}-{suffix}"),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(channel_kind: ChannelKind, volume_percent: u32, muted: bool) -> Presentation {
        Presentation::from(&MixerReport {
            channel_kind,
            volume_percent,
            muted,
        })
    }

    #[test]
    fn test_playback_unmuted() {
        let presentation = present(ChannelKind::Playback, 75, false);
        assert_eq!(presentation.title, "Playback");
        assert_eq!(presentation.icon, "audio-volume-high");
        assert_eq!(presentation.body, "Volume at 75%");
    }

    #[test]
    fn test_capture_muted() {
        let presentation = present(ChannelKind::Capture, 0, true);
        assert_eq!(presentation.title, "Microphone");
        assert_eq!(presentation.icon, "microphone-sensitivity-muted");
        assert_eq!(presentation.body, "Volume at 0% (muted)");
    }

    #[test]
    fn test_icon_level_boundaries() {
        let cases = [
            (0, "low"),
            (33, "low"),
            (34, "medium"),
            (67, "medium"),
            (68, "high"),
            (100, "high"),
            (150, "high"),
        ];
        for (volume, suffix) in cases {
            let presentation = present(ChannelKind::Playback, volume, false);
            assert_eq!(presentation.icon, format!("audio-volume-{suffix}"), "{volume}%");
        }
    }

    #[test]
    fn test_muted_overrides_level() {
        for volume in [0, 50, 100] {
            let presentation = present(ChannelKind::Playback, volume, true);
            assert_eq!(presentation.icon, "audio-volume-muted");
            assert!(presentation.body.ends_with("% (muted)"));
        }
    }
}
