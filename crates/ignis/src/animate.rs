use futures::{Stream, StreamExt};
use ignis_render::{DrawSurface, NetworkView};

/// Ticks `view` once per item of `ticks` until it settles, is disposed, or the stream ends.
/// Returns the number of ticks consumed.
pub async fn animate<S, T>(view: &mut NetworkView<S>, ticks: T) -> usize
where
    S: DrawSurface,
    T: Stream + Unpin,
{
    let mut ticks = ticks;
    let mut consumed = 0;
    while !view.is_settled() {
        if ticks.next().await.is_none() {
            break;
        }
        consumed += 1;
        if !view.tick() {
            break;
        }
    }
    tracing::debug!(consumed, settled = view.is_settled(), "animation finished");
    consumed
}
