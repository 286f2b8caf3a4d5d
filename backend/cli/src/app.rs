//! Wiring: settings → collaborators → interpreter.

use std::sync::Arc;

use anyhow::Result;
use mowa_browser::SystemBrowser;
use mowa_commands::{build_default_dispatcher, BuiltinOptions, CommandDispatcher, Services};
use mowa_core::Notify;
use mowa_system::DesktopControl;
use mowa_tts::{create_tts, AudioPlayer, ConsoleNotifier, SpeechNotifier, TtsProviderKind};
use mowa_understanding::{MicrophoneCapture, SoxRecorder, SttEngine};
use mowa_weather::ImgwClient;
use tracing::{info, warn};

use crate::config::{Settings, SpeechSettings, TtsSettings};

pub fn builtin_options(settings: &Settings) -> BuiltinOptions {
    BuiltinOptions::new(settings.search.clone(), &settings.music, &settings.clock)
}

/// Spoken feedback when a provider and key are configured; console echo otherwise.
pub fn build_notifier(settings: &Settings) -> Arc<dyn Notify> {
    let kind = match &settings.tts {
        TtsSettings::Console => None,
        TtsSettings::OpenAi { api_key: None, .. } | TtsSettings::ElevenLabs { api_key: None, .. } => {
            warn!("No TTS API key configured; feedback will only be printed");
            None
        }
        TtsSettings::OpenAi { api_key: Some(api_key), model, voice } => Some(TtsProviderKind::OpenAi {
            api_key: api_key.clone(),
            model: model.clone(),
            voice: voice.clone(),
        }),
        TtsSettings::ElevenLabs { api_key: Some(api_key), model, voice } => {
            Some(TtsProviderKind::ElevenLabs {
                api_key: api_key.clone(),
                model: model.clone(),
                voice_id: voice.clone(),
            })
        }
    };

    let Some(kind) = kind else {
        return Arc::new(ConsoleNotifier);
    };
    let player = settings
        .player
        .as_deref()
        .and_then(AudioPlayer::from_command_line)
        .unwrap_or_else(|| AudioPlayer::for_platform(&settings.platform));
    info!(player = player.program(), "Spoken feedback enabled");
    Arc::new(SpeechNotifier::new(create_tts(kind), player))
}

pub fn build_services(settings: &Settings) -> Result<Services> {
    Ok(Services {
        notifier: build_notifier(settings),
        weather: Arc::new(ImgwClient::with_endpoint(&settings.weather_endpoint)?),
        browser: Arc::new(SystemBrowser::new()),
        system: Arc::new(DesktopControl::for_platform(settings.platform.clone())),
    })
}

pub fn build_dispatcher(settings: &Settings) -> Result<CommandDispatcher> {
    let services = build_services(settings)?;
    Ok(build_default_dispatcher(&builtin_options(settings), services)?)
}

/// STT engine for the configured backend, with the configured language.
pub fn build_stt(settings: &Settings) -> Result<SttEngine> {
    let language = settings.language.clone();
    let engine = match &settings.speech {
        SpeechSettings::WhisperApi { api_key, model } => {
            let api_key = api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("speech.apiKey (or OPENAI_API_KEY) is required for whisper"))?;
            SttEngine::WhisperApi {
                api_key,
                model: model.clone().unwrap_or_else(|| "whisper-1".into()),
                language,
            }
        }
        SpeechSettings::Deepgram { api_key, model } => {
            let api_key = api_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("speech.apiKey (or DEEPGRAM_API_KEY) is required for deepgram"))?;
            SttEngine::Deepgram {
                api_key,
                model: model.clone().unwrap_or_else(|| "nova-2".into()),
                language,
            }
        }
        SpeechSettings::WhisperCli { model_path } => SttEngine::WhisperCli {
            model_path: model_path.clone(),
            language,
        },
    };
    Ok(engine)
}

pub fn build_microphone(settings: &Settings) -> Result<MicrophoneCapture> {
    let recorder = SoxRecorder::new(settings.max_seconds);
    Ok(MicrophoneCapture::new(recorder, build_stt(settings)?))
}
