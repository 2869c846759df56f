use fnv::FnvHashMap;
use neon_core::{AudioSink, PlayOnce, SoundCue};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

struct Slot {
    buffer: Option<web::AudioBuffer>,
    gain: web::GainNode,
    source: Option<web::AudioBufferSourceNode>,
    once: PlayOnce,
}

/// The three page sounds. Buffers fill in asynchronously; playing a cue
/// whose buffer has not arrived is a silent no-op.
#[derive(Clone)]
pub struct SoundBank {
    ctx: web::AudioContext,
    slots: Rc<RefCell<FnvHashMap<SoundCue, Slot>>>,
}

fn create_gain(ctx: &web::AudioContext, value: f32) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(ctx).map_err(js_err)?;
    g.gain().set_value(value);
    g.connect_with_audio_node(&ctx.destination())
        .map_err(js_err)?;
    Ok(g)
}

impl SoundBank {
    pub fn new(ctx: web::AudioContext) -> anyhow::Result<Self> {
        let mut slots = FnvHashMap::default();
        for cue in SoundCue::ALL {
            slots.insert(
                cue,
                Slot {
                    buffer: None,
                    gain: create_gain(&ctx, cue.volume())?,
                    source: None,
                    once: PlayOnce::default(),
                },
            );
        }
        Ok(Self {
            ctx,
            slots: Rc::new(RefCell::new(slots)),
        })
    }

    /// Kick off fetch + decode for every cue.
    pub fn load_all(&self) {
        for cue in SoundCue::ALL {
            let bank = self.clone();
            spawn_local(async move {
                match decode(&bank.ctx, cue.path()).await {
                    Ok(buffer) => {
                        let waiting = match bank.slots.borrow_mut().get_mut(&cue) {
                            Some(slot) => {
                                slot.buffer = Some(buffer);
                                slot.once.loaded()
                            }
                            None => false,
                        };
                        log::info!("[audio] loaded {}", cue.path());
                        if waiting {
                            bank.play(cue);
                        }
                    }
                    Err(e) => log::warn!("[audio] {} unavailable: {:?}", cue.path(), e),
                }
            });
        }
    }

    /// Start `cue` the first time this is called, or as soon as its buffer
    /// arrives if it is still loading.
    pub fn play_once(&self, cue: SoundCue) {
        self.resume();
        let start = match self.slots.borrow_mut().get_mut(&cue) {
            Some(slot) => {
                let loaded = slot.buffer.is_some();
                slot.once.request(loaded)
            }
            None => false,
        };
        if start {
            self.play(cue);
        }
    }

    /// Browsers start the context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
    }
}

async fn decode(ctx: &web::AudioContext, path: &str) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {}", resp.status());
    }
    let bytes = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes: js_sys::ArrayBuffer = bytes.dyn_into().map_err(js_err)?;
    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(js_err)
}

impl AudioSink for SoundBank {
    #[allow(deprecated)]
    fn play(&self, cue: SoundCue) {
        self.resume();
        let mut slots = self.slots.borrow_mut();
        let Some(slot) = slots.get_mut(&cue) else {
            return;
        };
        let Some(buffer) = slot.buffer.as_ref() else {
            log::debug!("[audio] {:?} not loaded yet", cue);
            return;
        };
        if cue.looped() && slot.source.is_some() {
            return;
        }
        // one-shots restart from the beginning
        if let Some(prev) = slot.source.take() {
            let _ = prev.stop();
        }
        let Ok(source) = web::AudioBufferSourceNode::new(&self.ctx) else {
            return;
        };
        source.set_buffer(Some(buffer));
        source.set_loop(cue.looped());
        if source.connect_with_audio_node(&slot.gain).is_err() {
            return;
        }
        // rejected playback (autoplay policy) is discarded
        let _ = source.start();
        slot.source = Some(source);
    }

    #[allow(deprecated)]
    fn stop(&self, cue: SoundCue) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(&cue) {
            if let Some(source) = slot.source.take() {
                let _ = source.stop();
            }
        }
    }
}
