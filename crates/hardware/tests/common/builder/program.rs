use clockbus_core::isa::Opcode;

/// Assembles a program image: instructions first, then data bytes.
///
/// Operands are absolute addresses, so callers place data with
/// [`ProgramBuilder::data_base`] in mind.
#[derive(Debug, Default, Clone)]
pub struct ProgramBuilder {
    code: Vec<u8>,
    data: Vec<u8>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instruction(mut self, opcode: Opcode, operand: u8) -> Self {
        self.code.push(u8::from(opcode));
        self.code.push(operand);
        self
    }

    pub fn load(self, address: u8) -> Self {
        self.instruction(Opcode::Load, address)
    }

    pub fn store(self, address: u8) -> Self {
        self.instruction(Opcode::Store, address)
    }

    pub fn add(self, address: u8) -> Self {
        self.instruction(Opcode::Add, address)
    }

    pub fn print(self) -> Self {
        self.instruction(Opcode::Print, 0)
    }

    pub fn halt(self) -> Self {
        self.instruction(Opcode::Halt, 0)
    }

    /// Raw bytes appended to the code section.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.code.extend_from_slice(bytes);
        self
    }

    pub fn data(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Address the first data byte will land at.
    pub fn data_base(&self) -> usize {
        self.code.len()
    }

    pub fn build(self) -> Vec<u8> {
        let mut image = self.code;
        image.extend(self.data);
        image
    }
}
