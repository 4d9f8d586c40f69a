//! Four-step guest intake
//!
//! ```text
//! AwaitingIdentity -> CapturingDocument -> CapturingFace -> Confirmed
//! ```
//!
//! Transitions only move forward. The sequencer owns the single camera
//! stream of the session:
//! - `CapturingDocument` opens the environment camera
//! - `CapturingFace` opens the user camera and arms the countdown
//! - every step exit, cancellation and acquisition failure releases it
//!
//! A failed acquisition closes the session and is reported as a
//! cancellation. A failed encode keeps the step and the stream so the
//! capture can be retried; on the face step the countdown is re-armed.

use crate::camera::{Camera, Facing, Resolution, StreamGuard};
use crate::encoder::StillEncoder;
use crate::error::{CancelReason, IntakeError};
use crate::frame::normalize;
use crate::timer::{start_countdown, TimerEvent};
use chrono::{DateTime, TimeZone};
use inncheck_core::cpf::{self, IdentifierFeedback, CPF_LEN};
use inncheck_core::{assemble, CapturedImage, Cpf, GuestRecord, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Sequencer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Seconds before the face photo is taken automatically
    pub countdown_secs: u32,
    /// Side of the stored square images, in pixels
    pub output_size: u32,
    /// Side of the square resolution requested from the camera
    pub ideal_resolution: u32,
    /// Length of one countdown step
    pub tick_period: Duration,
}

impl CaptureConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set countdown length
    #[inline]
    #[must_use]
    pub fn with_countdown_secs(mut self, secs: u32) -> Self {
        self.countdown_secs = secs;
        self
    }

    /// Set stored image size
    #[inline]
    #[must_use]
    pub fn with_output_size(mut self, size: u32) -> Self {
        self.output_size = size;
        self
    }

    /// Set requested camera resolution
    #[inline]
    #[must_use]
    pub fn with_ideal_resolution(mut self, side: u32) -> Self {
        self.ideal_resolution = side;
        self
    }

    /// Set countdown step length
    #[inline]
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 10,
            output_size: 400,
            ideal_resolution: 600,
            tick_period: Duration::from_secs(1),
        }
    }
}

/// Intake step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureStep {
    /// Name and CPF entry
    AwaitingIdentity,
    /// Photo of the identity document
    CapturingDocument,
    /// Timed face photo
    CapturingFace,
    /// Both photos taken, record ready
    Confirmed,
}

impl CaptureStep {
    /// Camera held during this step
    #[must_use]
    pub fn facing(self) -> Option<Facing> {
        match self {
            Self::CapturingDocument => Some(Facing::Environment),
            Self::CapturingFace => Some(Facing::User),
            Self::AwaitingIdentity | Self::Confirmed => None,
        }
    }
}

impl fmt::Display for CaptureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingIdentity => "awaiting identity",
            Self::CapturingDocument => "capturing document",
            Self::CapturingFace => "capturing face",
            Self::Confirmed => "confirmed",
        })
    }
}

/// Operator input while the face countdown runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    /// Take the photo now
    Capture,
    /// Abandon the intake
    Cancel,
}

/// State of one intake, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSession {
    step: CaptureStep,
    name: String,
    identifier: String,
    document: Option<CapturedImage>,
    face: Option<CapturedImage>,
    countdown: u32,
    camera_ready: bool,
    closed: bool,
}

impl CaptureSession {
    fn new(countdown: u32) -> Self {
        Self {
            step: CaptureStep::AwaitingIdentity,
            name: String::new(),
            identifier: String::new(),
            document: None,
            face: None,
            countdown,
            camera_ready: false,
            closed: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> CaptureStep {
        self.step
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier digits typed so far
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    #[must_use]
    pub fn document_image(&self) -> Option<&CapturedImage> {
        self.document.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn face_image(&self) -> Option<&CapturedImage> {
        self.face.as_ref()
    }

    /// Seconds left before the face photo is taken
    #[inline]
    #[must_use]
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Whether a camera stream is open
    #[inline]
    #[must_use]
    pub fn camera_ready(&self) -> bool {
        self.camera_ready
    }

    /// Whether the session was cancelled
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Drives one guest intake
pub struct CaptureSequencer<C: Camera, E: StillEncoder> {
    camera: C,
    encoder: E,
    config: CaptureConfig,
    session: CaptureSession,
    stream: Option<StreamGuard<C::Stream>>,
}

impl<C: Camera, E: StillEncoder> CaptureSequencer<C, E> {
    /// Start a session at `AwaitingIdentity`
    #[must_use]
    pub fn new(camera: C, encoder: E, config: CaptureConfig) -> Self {
        Self {
            camera,
            encoder,
            session: CaptureSession::new(config.countdown_secs),
            config,
            stream: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> CaptureStep {
        self.session.step
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Set the guest name
    ///
    /// # Errors
    /// `SessionClosed`, or `WrongStep` past `AwaitingIdentity`.
    pub fn set_name(&mut self, name: &str) -> Result<(), IntakeError> {
        self.ensure_step(CaptureStep::AwaitingIdentity)?;
        self.session.name = name.to_string();
        Ok(())
    }

    /// Set the identifier as typed; non-digits are dropped and input is
    /// capped at 11 digits
    ///
    /// # Errors
    /// `SessionClosed`, or `WrongStep` past `AwaitingIdentity`.
    pub fn set_identifier(&mut self, input: &str) -> Result<IdentifierFeedback, IntakeError> {
        self.ensure_step(CaptureStep::AwaitingIdentity)?;
        self.session.identifier = cpf::sanitize_input(input);
        Ok(cpf::feedback(&self.session.identifier))
    }

    /// First problem blocking `advance`, if any
    #[must_use]
    pub fn identity_issue(&self) -> Option<ValidationError> {
        if self.session.name.trim().is_empty() {
            return Some(ValidationError::EmptyName);
        }
        Cpf::parse(&self.session.identifier).err()
    }

    /// Whether `advance` would leave `AwaitingIdentity`
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.session.closed
            && self.session.step == CaptureStep::AwaitingIdentity
            && self.session.identifier.len() == CPF_LEN
            && self.identity_issue().is_none()
    }

    /// Leave `AwaitingIdentity` and open the environment camera
    ///
    /// A no-op returning the current step while the identity is invalid.
    ///
    /// # Errors
    /// `Cancelled` when the camera cannot be acquired, `SessionClosed`,
    /// or `WrongStep` past `AwaitingIdentity`.
    pub async fn advance(&mut self) -> Result<CaptureStep, IntakeError> {
        self.ensure_step(CaptureStep::AwaitingIdentity)?;
        if !self.can_advance() {
            tracing::debug!(issue = ?self.identity_issue(), "Identity incomplete, staying put");
            return Ok(self.session.step);
        }
        self.enter(CaptureStep::CapturingDocument).await?;
        Ok(self.session.step)
    }

    /// Take the photo for the current step
    ///
    /// # Errors
    /// `Encoding` or `Camera` leave the step unchanged and may be retried.
    /// `Cancelled` when the next camera cannot be acquired. `WrongStep`
    /// outside the capturing steps.
    pub async fn capture(&mut self) -> Result<CaptureStep, IntakeError> {
        self.ensure_open()?;
        let step = self.session.step;
        let mirror = match step {
            CaptureStep::CapturingDocument => false,
            CaptureStep::CapturingFace => true,
            actual => {
                return Err(IntakeError::WrongStep {
                    expected: CaptureStep::CapturingDocument,
                    actual,
                })
            }
        };

        let frame = self
            .stream
            .as_mut()
            .ok_or(IntakeError::CameraNotReady)?
            .frame()?;
        let still = normalize(&frame, self.config.output_size, mirror);
        let image = match self.encoder.encode(&still) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(%step, error = %e, "Capture failed to encode");
                if step == CaptureStep::CapturingFace {
                    self.session.countdown = self.config.countdown_secs;
                }
                return Err(e.into());
            }
        };

        if step == CaptureStep::CapturingDocument {
            self.session.document = Some(image);
            self.enter(CaptureStep::CapturingFace).await?;
        } else {
            self.session.face = Some(image);
            self.enter(CaptureStep::Confirmed).await?;
        }
        Ok(self.session.step)
    }

    /// One countdown step; captures when it reaches 0
    ///
    /// # Errors
    /// As [`capture`](Self::capture), plus `CameraNotReady` without a stream.
    pub async fn tick(&mut self) -> Result<CaptureStep, IntakeError> {
        self.ensure_step(CaptureStep::CapturingFace)?;
        if !self.session.camera_ready {
            return Err(IntakeError::CameraNotReady);
        }
        self.session.countdown = self.session.countdown.saturating_sub(1);
        tracing::debug!(remaining = self.session.countdown, "Countdown tick");
        if self.session.countdown == 0 {
            return self.capture().await;
        }
        Ok(self.session.step)
    }

    /// Run the face countdown in real time
    ///
    /// Captures on expiry or on [`CaptureCommand::Capture`], whichever comes
    /// first. [`CaptureCommand::Cancel`] cancels the session. A closed
    /// command channel leaves the countdown running.
    ///
    /// # Errors
    /// As [`capture`](Self::capture); `Cancelled` on a cancel command.
    pub async fn run_face_countdown(
        &mut self,
        commands: &mut mpsc::Receiver<CaptureCommand>,
    ) -> Result<CaptureStep, IntakeError> {
        self.ensure_step(CaptureStep::CapturingFace)?;
        if !self.session.camera_ready {
            return Err(IntakeError::CameraNotReady);
        }

        let (timer, mut events) = start_countdown(self.session.countdown, self.config.tick_period);
        let mut commands_open = true;
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(TimerEvent::Tick { remaining }) => {
                        self.session.countdown = remaining;
                        tracing::debug!(remaining, "Countdown tick");
                    }
                    Some(TimerEvent::Expired) | None => {
                        timer.cancel();
                        self.session.countdown = 0;
                        tracing::debug!("Countdown expired, capturing face");
                        return self.capture().await;
                    }
                },
                command = commands.recv(), if commands_open => match command {
                    Some(CaptureCommand::Capture) => {
                        timer.cancel();
                        return self.capture().await;
                    }
                    Some(CaptureCommand::Cancel) => {
                        timer.cancel();
                        self.cancel()?;
                        return Err(IntakeError::Cancelled(CancelReason::Requested));
                    }
                    None => commands_open = false,
                },
            }
        }
    }

    /// Abandon the intake, releasing the camera
    ///
    /// # Errors
    /// `SessionClosed` if already cancelled, `WrongStep` once confirmed.
    pub fn cancel(&mut self) -> Result<(), IntakeError> {
        self.ensure_open()?;
        if self.session.step == CaptureStep::Confirmed {
            return Err(IntakeError::WrongStep {
                expected: CaptureStep::CapturingFace,
                actual: CaptureStep::Confirmed,
            });
        }
        tracing::warn!(step = %self.session.step, "Intake cancelled");
        self.close();
        Ok(())
    }

    /// Assemble the guest record from a confirmed session
    ///
    /// # Errors
    /// `SessionClosed`, `WrongStep` before `Confirmed`, or `Validation`.
    pub fn complete<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Result<GuestRecord, IntakeError>
    where
        Tz::Offset: fmt::Display,
    {
        self.ensure_step(CaptureStep::Confirmed)?;
        let CaptureSession {
            name,
            identifier,
            document,
            face,
            ..
        } = self.session;
        let (Some(document), Some(face)) = (document, face) else {
            return Err(IntakeError::WrongStep {
                expected: CaptureStep::Confirmed,
                actual: CaptureStep::Confirmed,
            });
        };
        let record = assemble(&name, Cpf::parse(&identifier)?, document, face, now)?;
        tracing::info!(guest = record.name(), "Intake confirmed");
        Ok(record)
    }

    async fn enter(&mut self, step: CaptureStep) -> Result<(), IntakeError> {
        self.release_stream();
        tracing::info!(from = %self.session.step, to = %step, "Intake step");
        self.session.step = step;
        if step == CaptureStep::CapturingFace {
            self.session.countdown = self.config.countdown_secs;
        }

        let Some(facing) = step.facing() else {
            return Ok(());
        };
        let ideal = Resolution::square(self.config.ideal_resolution);
        match self.camera.acquire(facing, ideal).await {
            Ok(stream) => {
                tracing::debug!(%facing, "Camera stream acquired");
                self.stream = Some(StreamGuard::new(stream));
                self.session.camera_ready = true;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%facing, error = %e, "Camera unavailable, cancelling intake");
                self.close();
                Err(IntakeError::Cancelled(CancelReason::CameraUnavailable(e)))
            }
        }
    }

    fn release_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.release();
        }
        self.session.camera_ready = false;
    }

    fn close(&mut self) {
        self.release_stream();
        self.session.closed = true;
    }

    fn ensure_open(&self) -> Result<(), IntakeError> {
        if self.session.closed {
            Err(IntakeError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn ensure_step(&self, expected: CaptureStep) -> Result<(), IntakeError> {
        self.ensure_open()?;
        if self.session.step == expected {
            Ok(())
        } else {
            Err(IntakeError::WrongStep {
                expected,
                actual: self.session.step,
            })
        }
    }
}

impl<C: Camera, E: StillEncoder> fmt::Debug for CaptureSequencer<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSequencer")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
