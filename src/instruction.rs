//! Instruction catalogue.
//!
//! An instruction is represented as a tagged variant ([`InstructionVariant`])
//! rather than a class per kind (Design Note 9): operands live in a single
//! `Vec<ValueId>` and every typed accessor indexes into that same vector by a
//! fixed position, so the generic operand list and the "logical" fields can
//! never drift out of lock-step.

use crate::block::BlockId;
use crate::types::Type;
use crate::value::{Literal, ValueId};
use indexmap::IndexMap;

/// The operation an instruction performs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Alloca,
    Load,
    Store,
    GetElementPtr,
    Branch,
    Switch,
    Ret,
    Call,
    Phi,
    ICmp,
    FCmp,
    Trunc,
    Zext,
    Sext,
    FpTrunc,
    FpExt,
    Bitcast,
    Select,
    Freeze,
}

/// The comparison predicate carried by `ICmp`/`FCmp` instructions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Oeq,
    One,
    Olt,
    Ole,
    Ogt,
    Oge,
    Ueq,
    Une,
    Ult,
    Ule,
    Ugt,
    Uge,
}

/// The variant-specific payload of an instruction, beyond its shared operand
/// vector.
#[derive(Debug, Clone)]
pub enum InstructionVariant {
    /// `Add`/`Sub`/`Mul`/`Div`/`Rem`/`And`/`Or`/`Xor`/`Shl`/`Shr`.
    /// operands: `[left, right]`.
    Binary { op: InstructionKind },
    /// `ICmp`/`FCmp`. operands: `[left, right]`.
    Compare { op: InstructionKind, comparison: ComparisonKind },
    /// `Alloca`. operands: `[array_size]` if present, else empty.
    Alloca { allocated_type: Type, has_array_size: bool },
    /// `Load`. operands: `[pointer]`.
    Load,
    /// `Store`. operands: `[value, pointer]`.
    Store,
    /// `GetElementPtr`. operands: `[pointer, indices...]`.
    GetElementPtr { num_indices: usize },
    /// `Branch`. operands: `[condition]` if conditional, else empty.
    Branch { true_block: BlockId, false_block: Option<BlockId> },
    /// `Switch`. operands: `[scrutinee]`.
    Switch { default_block: BlockId, cases: Vec<(Literal, BlockId)> },
    /// `Ret`. operands: `[value]` if present, else empty.
    Ret { has_value: bool },
    /// `Call`. operands: `[function, arguments...]`.
    Call { num_arguments: usize },
    /// `Phi`. operands are the incoming values, in the same order as
    /// `incoming`'s iteration order.
    Phi { incoming: IndexMap<BlockId, ValueId> },
    /// `Trunc`/`Zext`/`Sext`/`FpTrunc`/`FpExt`/`Bitcast`. operands: `[value]`.
    Convert { op: InstructionKind, target_type: Type },
    /// `Select`. operands: `[condition, true_value, false_value]`.
    Select,
    /// `Freeze`. operands: `[value]`.
    Freeze,
}

impl InstructionVariant {
    pub fn kind(&self) -> InstructionKind {
        match self {
            InstructionVariant::Binary { op } => *op,
            InstructionVariant::Compare { op, .. } => *op,
            InstructionVariant::Alloca { .. } => InstructionKind::Alloca,
            InstructionVariant::Load => InstructionKind::Load,
            InstructionVariant::Store => InstructionKind::Store,
            InstructionVariant::GetElementPtr { .. } => InstructionKind::GetElementPtr,
            InstructionVariant::Branch { .. } => InstructionKind::Branch,
            InstructionVariant::Switch { .. } => InstructionKind::Switch,
            InstructionVariant::Ret { .. } => InstructionKind::Ret,
            InstructionVariant::Call { .. } => InstructionKind::Call,
            InstructionVariant::Phi { .. } => InstructionKind::Phi,
            InstructionVariant::Convert { op, .. } => *op,
            InstructionVariant::Select => InstructionKind::Select,
            InstructionVariant::Freeze => InstructionKind::Freeze,
        }
    }
}

/// An instruction: a variant payload plus the flat operand list every
/// use-def edge is drawn from.
#[derive(Debug, Clone)]
pub struct InstructionData {
    pub variant: InstructionVariant,
    pub operands: Vec<ValueId>,
    pub parent: Option<BlockId>,
}

impl InstructionData {
    pub fn new(variant: InstructionVariant, operands: Vec<ValueId>) -> Self {
        Self { variant, operands, parent: None }
    }

    pub fn kind(&self) -> InstructionKind {
        self.variant.kind()
    }

    // --- Binary / Compare ---

    pub fn left(&self) -> ValueId {
        self.operands[0]
    }

    pub fn right(&self) -> ValueId {
        self.operands[1]
    }

    // --- Alloca ---

    pub fn array_size(&self) -> Option<ValueId> {
        match &self.variant {
            InstructionVariant::Alloca { has_array_size, .. } if *has_array_size => {
                Some(self.operands[0])
            }
            _ => None,
        }
    }

    // --- Load / Store ---

    /// The pointer operand: position 0 for `Load`, position 1 for `Store`.
    pub fn pointer(&self) -> ValueId {
        match self.variant {
            InstructionVariant::Load => self.operands[0],
            InstructionVariant::Store => self.operands[1],
            InstructionVariant::GetElementPtr { .. } => self.operands[0],
            _ => panic!("pointer() called on a non-pointer-bearing instruction"),
        }
    }

    pub fn stored_value(&self) -> ValueId {
        self.operands[0]
    }

    // --- GetElementPtr ---

    pub fn indices(&self) -> &[ValueId] {
        &self.operands[1..]
    }

    // --- Branch ---

    pub fn condition(&self) -> Option<ValueId> {
        match &self.variant {
            InstructionVariant::Branch { false_block: Some(_), .. } => Some(self.operands[0]),
            _ => None,
        }
    }

    pub fn true_block(&self) -> BlockId {
        match &self.variant {
            InstructionVariant::Branch { true_block, .. } => *true_block,
            _ => panic!("true_block() called on a non-branch instruction"),
        }
    }

    pub fn false_block(&self) -> Option<BlockId> {
        match &self.variant {
            InstructionVariant::Branch { false_block, .. } => *false_block,
            _ => None,
        }
    }

    // --- Switch ---

    pub fn scrutinee(&self) -> ValueId {
        self.operands[0]
    }

    // --- Ret ---

    pub fn return_value(&self) -> Option<ValueId> {
        match &self.variant {
            InstructionVariant::Ret { has_value: true } => Some(self.operands[0]),
            _ => None,
        }
    }

    // --- Call ---

    pub fn callee(&self) -> ValueId {
        self.operands[0]
    }

    pub fn arguments(&self) -> &[ValueId] {
        &self.operands[1..]
    }

    // --- Phi ---

    pub fn incoming_value(&self, block: BlockId) -> Option<ValueId> {
        match &self.variant {
            InstructionVariant::Phi { incoming } => incoming.get(&block).copied(),
            _ => None,
        }
    }

    // --- Convert ---

    pub fn converted_value(&self) -> ValueId {
        self.operands[0]
    }

    pub fn target_type(&self) -> Option<&Type> {
        match &self.variant {
            InstructionVariant::Convert { target_type, .. } => Some(target_type),
            _ => None,
        }
    }

    // --- Select ---

    pub fn true_value(&self) -> ValueId {
        self.operands[1]
    }

    pub fn false_value(&self) -> ValueId {
        self.operands[2]
    }

    // --- Freeze ---

    pub fn frozen_value(&self) -> ValueId {
        self.operands[0]
    }
}
