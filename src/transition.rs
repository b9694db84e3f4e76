//! Page-transition support: one-shot animation engine initialization and
//! interception of in-site navigation so an exit animation can play first.

use futures::future::BoxFuture;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

/// Plugins registered with the animation engine on initialization.
pub const ENGINE_PLUGINS: [&str; 3] = ["ScrollTrigger", "ScrollSmoother", "TextPlugin"];

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("animation engine used before initialize()")]
    NotInitialized,
}

/// Global engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub trial_warn: bool,
    pub null_target_warn: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trial_warn: false,
            null_target_warn: false,
        }
    }
}

/// A single property tween.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub opacity: f32,
    /// Seconds
    pub duration: f32,
    /// Seconds
    pub delay: f32,
}

/// Smooth-scrolling defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SmootherOptions {
    pub smooth: f32,
    pub speed: f32,
    pub effects: bool,
    pub normalize_scroll: bool,
    pub smooth_touch: f32,
}

impl Default for SmootherOptions {
    fn default() -> Self {
        Self {
            smooth: 2.0,
            speed: 2.0,
            effects: true,
            normalize_scroll: false,
            smooth_touch: 0.1,
        }
    }
}

/// Curtain animations around a page change.
#[derive(Debug, Clone, PartialEq)]
pub struct CurtainTransition {
    /// Curtain fades out once the new page has loaded.
    pub enter: Tween,
    /// Curtain fades in before leaving the current page.
    pub exit: Tween,
}

impl Default for CurtainTransition {
    fn default() -> Self {
        Self {
            enter: Tween {
                opacity: 0.0,
                duration: 0.3,
                delay: 0.1,
            },
            exit: Tween {
                opacity: 1.0,
                duration: 0.3,
                delay: 0.0,
            },
        }
    }
}

/// What the engine was initialized with.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub config: EngineConfig,
    pub plugins: Vec<&'static str>,
    pub smoother: SmootherOptions,
    pub curtain: CurtainTransition,
}

/// Initialization state of the animation engine.
///
/// Initialization happens at most once per `Engine`; later calls are no-ops.
#[derive(Debug, Default)]
pub struct Engine {
    state: OnceLock<EngineState>,
}

impl Engine {
    pub const fn new() -> Self {
        Self {
            state: OnceLock::new(),
        }
    }

    /// The process-wide engine.
    pub fn global() -> &'static Engine {
        static GLOBAL: Engine = Engine::new();
        &GLOBAL
    }

    /// Register plugins and apply `config`. Returns `true` only for the call
    /// that actually performed the initialization.
    pub fn initialize(&self, config: EngineConfig) -> bool {
        let mut performed = false;
        self.state.get_or_init(|| {
            performed = true;
            info!("Animation engine initialized and plugins registered");
            EngineState {
                config,
                plugins: ENGINE_PLUGINS.to_vec(),
                smoother: SmootherOptions::default(),
                curtain: CurtainTransition::default(),
            }
        });
        performed
    }

    pub fn state(&self) -> Option<&EngineState> {
        self.state.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Curtain fade-out to play once a page has loaded.
    pub fn page_load_animation(&self) -> Result<Tween, TransitionError> {
        let state = self.state().ok_or(TransitionError::NotInitialized)?;
        debug!("Page load animation set up");
        Ok(state.curtain.enter.clone())
    }

    /// Scroll smoothing settings, with `overrides` applied when given.
    pub fn scroll_smoother(
        &self,
        overrides: Option<SmootherOptions>,
    ) -> Result<SmootherOptions, TransitionError> {
        let state = self.state().ok_or(TransitionError::NotInitialized)?;
        Ok(overrides.unwrap_or_else(|| state.smoother.clone()))
    }
}

/// Initialize the process-wide engine.
pub fn initialize(config: EngineConfig) -> bool {
    Engine::global().initialize(config)
}

/// An anchor as seen by the interceptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub href: Option<String>,
    pub target: Option<String>,
}

impl Link {
    pub fn new(href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            target: None,
        }
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    /// Absolute destination of the link relative to `current`.
    pub fn resolve(&self, current: &Url) -> Option<Url> {
        self.href.as_deref().and_then(|href| current.join(href).ok())
    }
}

/// Default interception rule.
///
/// Links without an href, links opening a new tab, `mailto:`/`tel:` links,
/// same-page anchors and links to the current URL are left alone.
pub fn should_intercept(link: &Link, current: &Url) -> bool {
    let Some(href) = link.href.as_deref().filter(|href| !href.is_empty()) else {
        return false;
    };

    if link.target.as_deref() == Some("_blank")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return false;
    }

    let Some(destination) = link.resolve(current) else {
        return false;
    };

    if href.starts_with('#') && destination.path() == current.path() {
        return false;
    }

    destination != *current
}

/// Navigation handed to the on-intercept hook.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptedNavigation {
    pub destination: Url,
    pub exit: Tween,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationDecision {
    /// Let the host navigate normally.
    PassThrough,
    /// The hook has run; the host should now navigate to this URL.
    Navigate(Url),
}

type Predicate = Box<dyn Fn(&Link, &Url) -> bool + Send + Sync>;
type Hook = Box<dyn Fn(InterceptedNavigation) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Decides which link activations to intercept and runs the exit hook
/// before the host performs the real navigation.
pub struct NavigationInterceptor<'e> {
    engine: &'e Engine,
    predicate: Predicate,
    hook: Option<Hook>,
}

impl<'e> NavigationInterceptor<'e> {
    pub fn new(engine: &'e Engine) -> Self {
        Self {
            engine,
            predicate: Box::new(should_intercept),
            hook: None,
        }
    }

    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Link, &Url) -> bool + Send + Sync + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn on_intercept<H>(mut self, hook: H) -> Self
    where
        H: Fn(InterceptedNavigation) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Run the interception for an activated link.
    ///
    /// A failing hook is logged; navigation still proceeds.
    pub async fn intercept(
        &self,
        link: &Link,
        current: &Url,
    ) -> Result<NavigationDecision, TransitionError> {
        let state = self.engine.state().ok_or(TransitionError::NotInitialized)?;

        if !(self.predicate)(link, current) {
            return Ok(NavigationDecision::PassThrough);
        }

        let Some(destination) = link.resolve(current) else {
            return Ok(NavigationDecision::PassThrough);
        };

        if let Some(hook) = &self.hook {
            let navigation = InterceptedNavigation {
                destination: destination.clone(),
                exit: state.curtain.exit.clone(),
            };
            if let Err(e) = hook(navigation).await {
                error!("Error in navigation hook for {}: {}", destination, e);
            }
        }

        Ok(NavigationDecision::Navigate(destination))
    }
}
