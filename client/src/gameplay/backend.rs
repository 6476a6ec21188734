//! Typed access to the word-game backend.
//!
//! All HTTP runs on one worker thread that owns the blocking client.
//! Requests go out over one channel and replies come back over another;
//! [`drain_backend_replies`] turns them into [`BackendReply`] messages once
//! per frame.

use bevy::prelude::*;
use buddy_protocol::{
    AiHintResponse, CUSTOM_CATEGORY, DailyGuessRequest, DailyStartRequest, GameMode, GameStatus,
    GuessRequest, ProtocolError, StartGameRequest, decode_reply, encode_json, paths,
};
use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::infra::dictionary;
use crate::infra::http::{HttpClient, HttpError, OfflineHttpClient, ReqwestHttpClient, join_url};
use crate::settings::{BackendSettings, SettingsResource};

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("backend worker is not running")]
    WorkerGone,
}

impl BackendError {
    /// Alert text. Backend rejections show the backend's own message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Protocol(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}

pub struct BackendApi {
    client: Box<dyn HttpClient>,
    base_url: String,
    dictionary_url: String,
}

impl BackendApi {
    pub fn new(client: Box<dyn HttpClient>, settings: &BackendSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.clone(),
            dictionary_url: settings.dictionary_url.clone(),
        }
    }

    pub fn categories(&self) -> Result<Vec<String>, BackendError> {
        self.get(&join_url(&self.base_url, paths::CATEGORIES))
    }

    pub fn start(&self, request: &StartGameRequest) -> Result<GameStatus, BackendError> {
        self.post(paths::START, Some(request))
    }

    pub fn start_daily(&self, request: &DailyStartRequest) -> Result<GameStatus, BackendError> {
        self.post(paths::DAILY_START, Some(request))
    }

    pub fn status(&self) -> Result<GameStatus, BackendError> {
        self.get(&join_url(&self.base_url, paths::STATUS))
    }

    pub fn daily_status(&self, category: &str) -> Result<GameStatus, BackendError> {
        let endpoint = join_url(&self.base_url, paths::DAILY_STATUS);
        let url = Url::parse_with_params(&endpoint, &[("category", category)])
            .map_err(|_| HttpError::InvalidUrl(endpoint.clone()))?;
        self.get(url.as_str())
    }

    pub fn guess(&self, request: &GuessRequest) -> Result<GameStatus, BackendError> {
        self.post(paths::GUESS, Some(request))
    }

    pub fn daily_guess(&self, request: &DailyGuessRequest) -> Result<GameStatus, BackendError> {
        self.post(paths::DAILY_GUESS, Some(request))
    }

    pub fn ai_hint(&self) -> Result<AiHintResponse, BackendError> {
        self.post::<(), _>(paths::AI_HINT, None)
    }

    /// Best effort; see [`dictionary::fetch_definition`].
    pub fn definition(&self, word: &str) -> Option<String> {
        dictionary::fetch_definition(self.client.as_ref(), &self.dictionary_url, word)
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        let response = self.client.get(url)?;
        Ok(decode_reply(response.status, &response.body)?)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, BackendError> {
        let body = body.map(encode_json).transpose()?;
        let response = self
            .client
            .post_json(&join_url(&self.base_url, path), body)?;
        Ok(decode_reply(response.status, &response.body)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    Categories,
    Start(StartGameRequest),
    StartDaily(DailyStartRequest),
    Status { mode: GameMode, category: String },
    Guess {
        letter: char,
        mode: GameMode,
        category: String,
    },
    AiHint,
    Definition { word: String },
}

#[derive(Message, Debug)]
pub enum BackendReply {
    Categories(Result<Vec<String>, BackendError>),
    Started {
        mode: GameMode,
        /// Topic of a custom game, echoed so the badge can show it.
        custom_topic: Option<String>,
        result: Result<GameStatus, BackendError>,
    },
    Status(Result<GameStatus, BackendError>),
    Guessed {
        letter: char,
        result: Result<GameStatus, BackendError>,
    },
    AiHint(Result<AiHintResponse, BackendError>),
    Definition {
        word: String,
        definition: Option<String>,
    },
}

/// Runs one request to completion. Called on the worker thread.
pub fn serve(api: &BackendApi, request: BackendRequest) -> BackendReply {
    match request {
        BackendRequest::Categories => BackendReply::Categories(api.categories()),
        BackendRequest::Start(request) => {
            let custom_topic = (request.category == CUSTOM_CATEGORY)
                .then(|| request.custom_topic.trim().to_string());
            BackendReply::Started {
                mode: GameMode::Random,
                custom_topic,
                result: api.start(&request),
            }
        }
        BackendRequest::StartDaily(request) => BackendReply::Started {
            mode: GameMode::Daily,
            custom_topic: None,
            result: api.start_daily(&request),
        },
        BackendRequest::Status { mode, category } => BackendReply::Status(match mode {
            GameMode::Random => api.status(),
            GameMode::Daily => api.daily_status(&category),
        }),
        BackendRequest::Guess {
            letter,
            mode,
            category,
        } => BackendReply::Guessed {
            letter,
            result: match mode {
                GameMode::Random => api.guess(&GuessRequest { letter }),
                GameMode::Daily => api.daily_guess(&DailyGuessRequest { letter, category }),
            },
        },
        BackendRequest::AiHint => BackendReply::AiHint(api.ai_hint()),
        BackendRequest::Definition { word } => {
            let definition = api.definition(&word);
            BackendReply::Definition { word, definition }
        }
    }
}

/// Main-thread handle on the worker.
#[derive(Resource)]
pub struct BackendWorker {
    requests: Sender<BackendRequest>,
    replies: Receiver<BackendReply>,
}

impl BackendWorker {
    pub fn spawn(api: BackendApi) -> Self {
        let (request_sender, request_receiver) = unbounded::<BackendRequest>();
        let (reply_sender, reply_receiver) = unbounded();

        let spawned = std::thread::Builder::new()
            .name("backend-worker".into())
            .spawn(move || {
                for request in request_receiver.iter() {
                    debug!("Backend request: {:?}", request);
                    if reply_sender.send(serve(&api, request)).is_err() {
                        break;
                    }
                }
            });
        if let Err(error) = spawned {
            error!("Failed to spawn backend worker thread: {}", error);
        }

        Self::from_channels(request_sender, reply_receiver)
    }

    /// Wraps existing channels; the caller plays the worker's part.
    pub fn from_channels(requests: Sender<BackendRequest>, replies: Receiver<BackendReply>) -> Self {
        Self { requests, replies }
    }

    pub fn send(&self, request: BackendRequest) -> Result<(), BackendError> {
        self.requests
            .send(request)
            .map_err(|_| BackendError::WorkerGone)
    }

    pub fn try_recv(&self) -> Option<BackendReply> {
        match self.replies.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

pub fn spawn_backend_worker(mut commands: Commands, settings: Res<SettingsResource>) {
    let backend = &settings.current.backend;
    let client: Box<dyn HttpClient> =
        match ReqwestHttpClient::new(Duration::from_millis(backend.timeout_ms)) {
            Ok(client) => Box::new(client),
            Err(error) => {
                error!("HTTP client unavailable, running offline: {}", error);
                Box::new(OfflineHttpClient::new(error.to_string()))
            }
        };
    info!("Backend worker talking to {}", backend.base_url);
    commands.insert_resource(BackendWorker::spawn(BackendApi::new(client, backend)));
}

pub fn drain_backend_replies(
    worker: Option<Res<BackendWorker>>,
    mut replies: MessageWriter<BackendReply>,
) {
    let Some(worker) = worker else {
        return;
    };
    while let Some(reply) = worker.try_recv() {
        replies.write(reply);
    }
}
