use crate::errors::{PlonkError, Result};
use crate::plonk::indexer::PlonkVerifierParams;
use crate::poly_commit::{pcs::ToBytes, transcript::PolyComTranscript};
use merlin::Transcript;
use plonk_algebra::prelude::*;
use rand_chacha::ChaChaRng;

/// The challenges of a PLONK proof, in derivation order.
pub const PLONK_CHALLENGES: [&str; 3] = ["gamma", "alpha", "zeta"];

/// Initialize the transcript when compute PLONK proof.
pub(crate) fn transcript_init_plonk<C: ToBytes, F: Scalar>(
    transcript: &mut Transcript,
    params: &PlonkVerifierParams<C, F>,
    public_inputs: &[F],
) {
    transcript.append_message(b"New Domain", b"PLONK");

    transcript.append_u64(b"CS size", params.cs_size as u64);
    transcript.append_message(b"field size", &F::get_field_size_le_bytes());
    for q in params.cm_q_vec.iter() {
        transcript.append_commitment(q);
    }
    for s in params.cm_s_vec.iter() {
        transcript.append_commitment(s);
    }
    transcript.append_field_elem(&params.root);
    for generator in params.k.iter() {
        transcript.append_field_elem(generator);
    }

    for public_input in public_inputs.iter() {
        transcript.append_field_elem(public_input);
    }
}

struct ChallengeSlot {
    name: &'static str,
    bindings: Vec<Vec<u8>>,
    value: Option<[u8; 32]>,
}

/// A transcript with named challenge slots.
///
/// Each slot collects the messages bound to it and is turned into a challenge
/// once, after every slot declared before it. The messages of a slot are only
/// absorbed into the underlying transcript when its challenge is computed, so
/// a challenge depends on its own bindings and on every earlier challenge.
pub struct ChallengeTranscript<'a> {
    transcript: &'a mut Transcript,
    slots: Vec<ChallengeSlot>,
}

impl<'a> ChallengeTranscript<'a> {
    /// Declare the challenge slots on top of an initialized transcript.
    pub fn new(transcript: &'a mut Transcript, names: &[&'static str]) -> Self {
        let slots = names
            .iter()
            .map(|name| ChallengeSlot {
                name,
                bindings: vec![],
                value: None,
            })
            .collect();
        Self { transcript, slots }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.slots
            .iter()
            .position(|slot| slot.name == name)
            .ok_or_else(|| PlonkError::UnknownChallenge(name.into()))
    }

    /// Bind a message to the challenge `name`.
    pub fn bind(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let index = self.position(name)?;
        let slot = &mut self.slots[index];
        if slot.value.is_some() {
            return Err(PlonkError::ChallengeAlreadyComputed(name.into()));
        }
        slot.bindings.push(bytes.to_vec());
        Ok(())
    }

    /// Bind a commitment to the challenge `name`.
    pub fn bind_commitment<C: ToBytes>(&mut self, name: &str, cm: &C) -> Result<()> {
        self.bind(name, &cm.to_bytes())
    }

    /// Compute the challenge `name`, or return it if it was computed before.
    pub fn compute_challenge(&mut self, name: &str) -> Result<[u8; 32]> {
        let index = self.position(name)?;
        if let Some(value) = self.slots[index].value {
            return Ok(value);
        }
        if index > 0 && self.slots[index - 1].value.is_none() {
            return Err(PlonkError::PreviousChallengeNotComputed(name.into()));
        }
        if self.slots[index].bindings.is_empty() {
            return Err(PlonkError::ChallengeNotBound(name.into()));
        }

        let slot = &mut self.slots[index];
        for binding in slot.bindings.iter() {
            self.transcript.append_message(b"bind", binding);
        }
        let mut buff = [0u8; 32];
        self.transcript
            .challenge_bytes(slot.name.as_bytes(), &mut buff);
        slot.value = Some(buff);
        Ok(buff)
    }

    /// Compute the challenge `name` as a field element.
    pub fn compute_field_challenge<F: Scalar>(&mut self, name: &str) -> Result<F> {
        let buff = self.compute_challenge(name)?;
        Ok(F::random(&mut ChaChaRng::from_seed(buff)))
    }

    /// Compute the challenge `name` as a field element that is not a root of unity
    /// of order `group_order`.
    pub fn compute_field_challenge_outside_domain<F: Scalar>(
        &mut self,
        name: &str,
        group_order: usize,
    ) -> Result<F> {
        let buff = self.compute_challenge(name)?;
        let mut prng = ChaChaRng::from_seed(buff);
        loop {
            let elem = F::random(&mut prng);
            // elem should not be root-of-unity
            if elem.pow(&[group_order as u64]) != F::one() {
                return Ok(elem);
            }
        }
    }
}
