use std::sync::mpsc::Receiver;

/// Platform speech-recognition capability. At most one transcript is
/// delivered per capture; the most recent result overwrites the query.
pub trait VoiceInput {
    fn is_available(&self) -> bool;

    /// Begin a capture. Returns the channel the transcript will arrive on,
    /// or `None` when the capability is unavailable.
    fn start_capture(&self) -> Option<Receiver<String>>;
}

/// Default implementation for environments without speech recognition.
/// The feature degrades silently: no error, no channel.
pub struct NoVoice;

impl VoiceInput for NoVoice {
    fn is_available(&self) -> bool {
        false
    }

    fn start_capture(&self) -> Option<Receiver<String>> {
        None
    }
}

pub fn platform_voice() -> Box<dyn VoiceInput> {
    Box::new(NoVoice)
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::mpsc;

    /// Test double that delivers a fixed transcript immediately.
    pub struct StubVoice(pub String);

    impl VoiceInput for StubVoice {
        fn is_available(&self) -> bool {
            true
        }

        fn start_capture(&self) -> Option<Receiver<String>> {
            let (tx, rx) = mpsc::channel();
            tx.send(self.0.clone()).ok();
            Some(rx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubVoice;
    use super::*;

    #[test]
    fn no_voice_is_unavailable_and_silent() {
        let voice = NoVoice;
        assert!(!voice.is_available());
        assert!(voice.start_capture().is_none());
    }

    #[test]
    fn stub_voice_delivers_one_transcript() {
        let voice = StubVoice("pension scheme".to_string());
        let rx = voice.start_capture().unwrap();
        assert_eq!(rx.recv().unwrap(), "pension scheme");
        assert!(rx.recv().is_err());
    }
}
