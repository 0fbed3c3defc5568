//! Command channel over one or two DSI links
//!
//! The channel owns the links of one logical panel. Frames are written to
//! a single link; transport settings can be applied to both. When the
//! secondary link is absent every operation on it is a no-op.

use nt35950_core::{ProtocolError, Step};
use nt35950_hal::{DsiLink, LinkSettings, LinkTarget, TransportError};

/// Primary link plus an optional secondary link
pub struct DualLink<L> {
    pub primary: L,
    pub secondary: Option<L>,
}

impl<L> DualLink<L> {
    pub fn new(primary: L, secondary: Option<L>) -> Self {
        Self { primary, secondary }
    }

    /// Link for `target`, `None` for a missing secondary
    pub fn get_mut(&mut self, target: LinkTarget) -> Option<&mut L> {
        match target {
            LinkTarget::Primary => Some(&mut self.primary),
            LinkTarget::Secondary => self.secondary.as_mut(),
        }
    }

    /// Present link targets, primary first
    pub fn targets(&self) -> impl Iterator<Item = LinkTarget> {
        let secondary = self.secondary.is_some().then_some(LinkTarget::Secondary);
        core::iter::once(LinkTarget::Primary).chain(secondary)
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }
}

/// Write-only command channel
pub struct CommandChannel<L> {
    links: DualLink<L>,
}

impl<L: DsiLink> CommandChannel<L> {
    pub fn new(links: DualLink<L>) -> Self {
        Self { links }
    }

    /// Send one raw frame on `target`
    ///
    /// A missing secondary reports [`TransportError::NotAttached`].
    pub fn send(&mut self, target: LinkTarget, frame: &[u8], step: Step) -> Result<usize, ProtocolError> {
        let link = self.links.get_mut(target).ok_or(ProtocolError {
            step,
            link: target,
            cause: TransportError::NotAttached,
        })?;

        link.write_buffer(frame).map_err(|cause| {
            trace!("{:?} failed on {:?}: {:?}", step, target, cause);
            ProtocolError {
                step,
                link: target,
                cause,
            }
        })
    }

    /// Send one raw frame on the primary link
    pub fn send_primary(&mut self, frame: &[u8], step: Step) -> Result<usize, ProtocolError> {
        self.send(LinkTarget::Primary, frame, step)
    }

    /// Set the low-power transport flag on one link
    pub fn set_low_power(&mut self, target: LinkTarget, enabled: bool) {
        if let Some(link) = self.links.get_mut(target) {
            link.set_low_power(enabled);
        }
    }

    /// Attach every present link, primary first
    ///
    /// If a link fails to attach, links attached before it are detached
    /// again.
    pub fn attach_all(&mut self, settings: &LinkSettings) -> Result<(), (LinkTarget, TransportError)> {
        self.links
            .primary
            .attach(settings)
            .map_err(|e| (LinkTarget::Primary, e))?;

        if let Some(secondary) = self.links.secondary.as_mut() {
            if let Err(e) = secondary.attach(settings) {
                if let Err(detach) = self.links.primary.detach() {
                    error!("Failed to detach {:?} link: {:?}", LinkTarget::Primary, detach);
                }
                return Err((LinkTarget::Secondary, e));
            }
        }

        Ok(())
    }

    /// Detach every present link, primary first
    ///
    /// Failures are logged and the next link is still detached.
    pub fn detach_all(&mut self) {
        for target in [LinkTarget::Primary, LinkTarget::Secondary] {
            if let Some(link) = self.links.get_mut(target) {
                if let Err(e) = link.detach() {
                    error!("Failed to detach {:?} link: {:?}", target, e);
                }
            }
        }
    }

    /// Access the links
    pub fn links(&self) -> &DualLink<L> {
        &self.links
    }

    /// Give the links back
    pub fn release(self) -> DualLink<L> {
        self.links
    }
}
