use super::{Code, Kind, Opcode, Operand, Opr, Table, AMAX, LEV_MAX};
use crate::lang::{Error, ErrorCode, Lex, Sym, SymSet};

type Result<T> = std::result::Result<T, Error>;

/// Compile a source text in one pass.
///
/// Returns the instruction buffer plus whatever diagnostics were
/// reported along the way, or the fatal error that aborted
/// compilation (resource limits only; syntax and semantic errors are
/// diagnostics, and the produced program is still runnable).
pub fn compile(source: &str) -> std::result::Result<Compiled, Error> {
    Parser::compile(source)
}

#[derive(Debug)]
pub struct Compiled {
    pub code: Code,
    pub errors: Vec<Error>,
}

/// ## Parser and code generator
///
/// One recursive routine per grammar production; each routine checks
/// its symbols against the table and emits instructions as it goes.
/// `fsys` is the recovery set threaded through every routine: on an
/// unexpected symbol, `test` reports a diagnostic and discards input
/// until something recognizable appears, so one compile can report
/// many errors and always terminates.
struct Parser<'a> {
    lex: Lex<'a>,
    table: Table,
    code: Code,
    errors: Vec<Error>,
    /// Frame size of the block being compiled. Starts at 3 per block
    /// for the static link, dynamic link, and return address; each
    /// declaration claims the next slot.
    dx: usize,
    decl_first: SymSet,
    stmt_first: SymSet,
    fac_first: SymSet,
}

impl<'a> Parser<'a> {
    fn compile(source: &'a str) -> std::result::Result<Compiled, Error> {
        let mut this = Parser {
            lex: Lex::new(source),
            table: Table::new(),
            code: Code::new(),
            errors: vec![],
            dx: 0,
            decl_first: SymSet::of(&[Sym::Const, Sym::Var, Sym::StringKw, Sym::Procedure]),
            stmt_first: SymSet::of(&[
                Sym::If,
                Sym::While,
                Sym::Scan,
                Sym::Print,
                Sym::Call,
                Sym::LBrace,
            ]),
            fac_first: SymSet::of(&[Sym::Ident, Sym::Number, Sym::StringLit, Sym::LParen]),
        };
        this.program()?;
        Ok(Compiled {
            code: this.code,
            errors: this.errors,
        })
    }

    fn sym(&self) -> Sym {
        self.lex.sym()
    }

    fn advance(&mut self) {
        self.lex.advance()
    }

    fn error(&self, code: ErrorCode) -> Error {
        Error::new(code)
            .in_line_number(Some(self.lex.line()))
            .in_column(&self.lex.column())
    }

    /// Record a diagnostic at the current symbol and keep going.
    fn report(&mut self, code: ErrorCode) {
        let error = self.error(code);
        self.errors.push(error);
    }

    /// Consume `sym`, or report `code` and leave the input alone.
    fn expect(&mut self, sym: Sym, code: ErrorCode) {
        if self.sym() == sym {
            self.advance();
        } else {
            self.report(code);
        }
    }

    /// Panic-mode recovery. If the current symbol is not in
    /// `expected`, report `code` and discard symbols until one in
    /// `expected` or `recover` (or the end of input) comes up.
    fn test(&mut self, expected: SymSet, recover: SymSet, code: ErrorCode) {
        if !expected.has(self.sym()) {
            self.report(code);
            while !expected.has(self.sym()) && !recover.has(self.sym()) && self.sym() != Sym::Nul {
                self.advance();
            }
        }
    }

    fn opr(&mut self, opr: Opr) -> Result<()> {
        self.code.emit(Opcode::Opr(opr), 0, Operand::None)?;
        Ok(())
    }

    /// Lexical distance from a use at `lev` to its declaration. Never
    /// negative under correct scoping; a failure here is a compiler
    /// bug, not a user error.
    fn level_diff(&self, lev: usize, decl_level: usize) -> Result<usize> {
        match lev.checked_sub(decl_level) {
            Some(diff) => Ok(diff),
            None => Err(self.error(ErrorCode::InternalError)),
        }
    }

    // program := "main" "{" block "}"
    fn program(&mut self) -> Result<()> {
        self.advance();
        self.expect(Sym::Main, ErrorCode::ExpectedMain);
        self.expect(Sym::LBrace, ErrorCode::ExpectedProgramBrace);
        let fsys = self.decl_first | self.stmt_first | SymSet::of(&[Sym::RBrace]);
        self.block(0, fsys, None)?;
        if self.sym() != Sym::RBrace {
            self.report(ErrorCode::ExpectedProgramEnd);
        }
        Ok(())
    }

    // block := { declaration } stmt-seq
    //
    // Emits, in order: a placeholder jump over any nested procedure
    // bodies, the frame reservation once the final frame size is
    // known, the statements, and the frame release. `proc_item` is the
    // table index of the procedure this block belongs to; its entry
    // address is patched to the reservation instruction.
    fn block(&mut self, lev: usize, fsys: SymSet, proc_item: Option<usize>) -> Result<()> {
        if lev > LEV_MAX {
            return Err(self.error(ErrorCode::NestingTooDeep));
        }
        let dx0 = self.dx;
        self.dx = 3;
        let mark = self.table.mark();
        let body_jump = self.code.emit_hole(Opcode::Jmp)?;

        loop {
            if self.sym() == Sym::Const {
                self.advance();
                self.const_declaration(lev)?;
                while self.sym() == Sym::Comma {
                    self.advance();
                    self.const_declaration(lev)?;
                }
                self.expect(Sym::Semicolon, ErrorCode::ExpectedDeclSemicolon);
            }
            if self.sym() == Sym::Var {
                self.advance();
                self.var_declaration(lev);
                while self.sym() == Sym::Comma {
                    self.advance();
                    self.var_declaration(lev);
                }
                self.expect(Sym::Semicolon, ErrorCode::ExpectedDeclSemicolon);
            }
            if self.sym() == Sym::StringKw {
                self.advance();
                self.string_declaration(lev);
                while self.sym() == Sym::Comma {
                    self.advance();
                    self.string_declaration(lev);
                }
                self.expect(Sym::Semicolon, ErrorCode::ExpectedStringSemicolon);
            }
            while self.sym() == Sym::Procedure {
                self.advance();
                let mut proc_index = None;
                if self.sym() == Sym::Ident {
                    let id = self.lex.id().clone();
                    proc_index = self.table.enter(&id, Kind::Procedure, lev, 0);
                    if proc_index.is_none() {
                        self.report(ErrorCode::DuplicateIdent);
                    }
                    self.advance();
                } else {
                    self.report(ErrorCode::ExpectedProcedureIdent);
                }
                self.expect(Sym::LBrace, ErrorCode::ExpectedProcedureBrace);
                let nxt = fsys | SymSet::of(&[Sym::Semicolon, Sym::RBrace]);
                self.block(lev + 1, nxt, proc_index)?;
                self.expect(Sym::RBrace, ErrorCode::ExpectedBraceEnd);
                if self.sym() == Sym::Semicolon {
                    self.advance();
                    let follow =
                        self.stmt_first | SymSet::of(&[Sym::Ident, Sym::Procedure, Sym::RBrace]);
                    self.test(follow, fsys, ErrorCode::ExpectedStatementAfterProcedure);
                } else {
                    self.report(ErrorCode::ExpectedProcedureSemicolon);
                }
            }
            if self.sym() == Sym::RBrace {
                break;
            }
            let follow = self.stmt_first | SymSet::of(&[Sym::Ident]);
            self.test(follow, self.decl_first, ErrorCode::UnexpectedDeclaration);
            if !self.decl_first.has(self.sym()) {
                break;
            }
        }

        // Declarations are done; the frame size is final. The skip
        // jump lands on the reservation instruction, and so does a
        // CAL of this block's procedure.
        let body = self.code.len();
        self.code.patch(body_jump, body);
        if let Some(index) = proc_item {
            let item = self.table.get_mut(index);
            item.adr = body;
            item.size = self.dx;
        }
        self.code
            .emit(Opcode::Int, 0, Operand::Number(self.dx as i32))?;

        let nxt = fsys | SymSet::of(&[Sym::Semicolon, Sym::RBrace]);
        self.stmt_seq(nxt, lev)?;
        self.opr(Opr::Return)?;
        self.test(fsys, SymSet::empty(), ErrorCode::UnexpectedBlockEnd);

        self.dx = dx0;
        self.table.rewind(mark);
        Ok(())
    }

    fn const_declaration(&mut self, lev: usize) -> Result<()> {
        if self.sym() != Sym::Ident {
            self.report(ErrorCode::ExpectedConstIdent);
            return Ok(());
        }
        let id = self.lex.id().clone();
        self.advance();
        self.expect(Sym::Eql, ErrorCode::ExpectedConstEqual);
        if self.sym() != Sym::Number {
            self.report(ErrorCode::ExpectedConstNumber);
            return Ok(());
        }
        if self.lex.num() > AMAX {
            return Err(self.error(ErrorCode::NumberTooLarge));
        }
        let val = self.lex.num() as i32;
        self.advance();
        match self.table.enter(&id, Kind::Constant, lev, 0) {
            Some(index) => self.table.get_mut(index).val = val,
            None => self.report(ErrorCode::DuplicateIdent),
        }
        Ok(())
    }

    fn var_declaration(&mut self, lev: usize) {
        if self.sym() == Sym::Ident {
            let id = self.lex.id().clone();
            match self.table.enter(&id, Kind::Variable, lev, self.dx) {
                Some(_) => self.dx += 1,
                None => self.report(ErrorCode::DuplicateIdent),
            }
            self.advance();
        } else {
            self.report(ErrorCode::ExpectedVarIdent);
        }
    }

    fn string_declaration(&mut self, lev: usize) {
        if self.sym() == Sym::Ident {
            let id = self.lex.id().clone();
            match self.table.enter(&id, Kind::Text, lev, self.dx) {
                Some(_) => self.dx += 1,
                None => self.report(ErrorCode::DuplicateIdent),
            }
            self.advance();
        } else {
            self.report(ErrorCode::ExpectedStringIdent);
        }
    }

    // stmt-seq := [ stmt { ";" stmt } ]
    fn stmt_seq(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        let nxt = fsys | SymSet::of(&[Sym::Semicolon, Sym::RBrace]);
        self.statement(nxt, lev)?;
        while self.stmt_first.has(self.sym()) || self.sym() == Sym::Semicolon {
            self.expect(Sym::Semicolon, ErrorCode::ExpectedSemicolon);
            self.statement(nxt, lev)?;
        }
        Ok(())
    }

    fn statement(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        match self.sym() {
            Sym::Ident => self.assignment(fsys, lev),
            Sym::If => self.r#if(fsys, lev),
            Sym::While => self.r#while(fsys, lev),
            Sym::Scan => self.scan(fsys, lev),
            Sym::Print => self.print(fsys, lev),
            Sym::Call => self.call(lev),
            Sym::LBrace => self.compound(fsys, lev),
            _ => {
                self.test(fsys, SymSet::empty(), ErrorCode::ExpectedStatement);
                Ok(())
            }
        }
    }

    fn compound(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        self.advance();
        self.stmt_seq(fsys, lev)?;
        self.expect(Sym::RBrace, ErrorCode::ExpectedBraceEnd);
        Ok(())
    }

    // The store opcode follows the declared kind, numeric or string.
    fn assignment(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        match self.table.position(self.lex.id()) {
            None => self.report(ErrorCode::UndeclaredAssignTarget),
            Some(index) => {
                let item = self.table.get(index);
                let (kind, level, adr) = (item.kind, item.level, item.adr);
                match kind {
                    Kind::Variable => {
                        self.advance();
                        self.expect(Sym::Becomes, ErrorCode::ExpectedBecomes);
                        self.expression(fsys, lev)?;
                        let l = self.level_diff(lev, level)?;
                        self.code.emit(Opcode::Sto, l, Operand::Number(adr as i32))?;
                    }
                    Kind::Text => {
                        self.advance();
                        self.expect(Sym::Becomes, ErrorCode::ExpectedStringBecomes);
                        self.str_expression(fsys, lev)?;
                        let l = self.level_diff(lev, level)?;
                        self.code
                            .emit(Opcode::Stos, l, Operand::Number(adr as i32))?;
                    }
                    _ => self.report(ErrorCode::AssignToNonVariable),
                }
            }
        }
        Ok(())
    }

    fn r#if(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        self.advance();
        self.expect(Sym::LParen, ErrorCode::ExpectedIfParen);
        let nxt = fsys | SymSet::of(&[Sym::RParen, Sym::Then]);
        self.condition(nxt, lev)?;
        self.expect(Sym::RParen, ErrorCode::ExpectedIfEndParen);
        self.expect(Sym::Then, ErrorCode::ExpectedThen);
        let skip = self.code.emit_hole(Opcode::Jpc)?;
        self.statement(fsys, lev)?;
        if self.sym() == Sym::Else {
            let done = self.code.emit_hole(Opcode::Jmp)?;
            let here = self.code.len();
            self.code.patch(skip, here);
            self.advance();
            self.statement(fsys, lev)?;
            let here = self.code.len();
            self.code.patch(done, here);
        } else {
            let here = self.code.len();
            self.code.patch(skip, here);
        }
        Ok(())
    }

    fn r#while(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        let top = self.code.len();
        self.advance();
        self.expect(Sym::LParen, ErrorCode::ExpectedWhileParen);
        let nxt = fsys | SymSet::of(&[Sym::RParen]);
        self.condition(nxt, lev)?;
        self.expect(Sym::RParen, ErrorCode::ExpectedWhileEndParen);
        let exit = self.code.emit_hole(Opcode::Jpc)?;
        self.statement(fsys, lev)?;
        self.code.emit(Opcode::Jmp, 0, Operand::Number(top as i32))?;
        let here = self.code.len();
        self.code.patch(exit, here);
        Ok(())
    }

    // An unknown or non-procedure name is a diagnostic and emits no
    // call instruction for this site.
    fn call(&mut self, lev: usize) -> Result<()> {
        self.advance();
        if self.sym() == Sym::Ident {
            match self.table.position(self.lex.id()) {
                None => self.report(ErrorCode::UndeclaredProcedure),
                Some(index) => {
                    let item = self.table.get(index);
                    let (kind, level, adr) = (item.kind, item.level, item.adr);
                    if kind == Kind::Procedure {
                        let l = self.level_diff(lev, level)?;
                        self.code.emit(Opcode::Cal, l, Operand::Number(adr as i32))?;
                    } else {
                        self.report(ErrorCode::CallOfNonProcedure);
                    }
                }
            }
            self.advance();
        } else {
            self.report(ErrorCode::ExpectedCallIdent);
        }
        Ok(())
    }

    // print(e1, e2, ...): a value op per argument, a space op between
    // arguments, one newline op after everything.
    fn print(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        self.advance();
        if self.sym() == Sym::LParen {
            let mut count = 0;
            loop {
                if count > 0 {
                    self.opr(Opr::Space)?;
                }
                count += 1;
                self.advance();
                let nxt = fsys | SymSet::of(&[Sym::RParen, Sym::Comma]);
                if self.sym() == Sym::StringLit {
                    let text = self.lex.text().clone();
                    self.code.emit(Opcode::Lits, 0, Operand::Text(text))?;
                    self.advance();
                } else if self.string_ident() {
                    self.str_expression(nxt, lev)?;
                } else {
                    self.expression(nxt, lev)?;
                }
                self.opr(Opr::Print)?;
                if self.sym() != Sym::Comma {
                    break;
                }
            }
            if self.sym() == Sym::RParen {
                self.advance();
            } else {
                self.report(ErrorCode::ExpectedPrintEndParen);
            }
        } else {
            self.report(ErrorCode::ExpectedPrintParen);
        }
        self.opr(Opr::Newline)?;
        Ok(())
    }

    // scan(v1, v2, ...): a blocking read then a store per target;
    // read and store opcodes follow the declared kind.
    fn scan(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        self.advance();
        if self.sym() == Sym::LParen {
            loop {
                self.advance();
                let index = if self.sym() == Sym::Ident {
                    self.table.position(self.lex.id())
                } else {
                    None
                };
                match index {
                    None => self.report(ErrorCode::UnknownScanTarget),
                    Some(index) => {
                        let item = self.table.get(index);
                        let (kind, level, adr) = (item.kind, item.level, item.adr);
                        match kind {
                            Kind::Variable => {
                                self.opr(Opr::Read)?;
                                let l = self.level_diff(lev, level)?;
                                self.code.emit(Opcode::Sto, l, Operand::Number(adr as i32))?;
                            }
                            Kind::Text => {
                                self.opr(Opr::ReadText)?;
                                let l = self.level_diff(lev, level)?;
                                self.code
                                    .emit(Opcode::Stos, l, Operand::Number(adr as i32))?;
                            }
                            _ => self.report(ErrorCode::ScanTargetNotAssignable),
                        }
                    }
                }
                self.advance();
                if self.sym() != Sym::Comma {
                    break;
                }
            }
        } else {
            self.report(ErrorCode::ExpectedScanParen);
        }
        if self.sym() == Sym::RParen {
            self.advance();
        } else {
            self.report(ErrorCode::ExpectedScanEndParen);
            while !fsys.has(self.sym()) && self.sym() != Sym::Nul {
                self.advance();
            }
        }
        Ok(())
    }

    // expr := ["+"|"-"] term { ("+"|"-") term }
    //
    // Operands are emitted before their operator, so infix source
    // becomes correct left-to-right postfix code.
    fn expression(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        let nxt = fsys | SymSet::of(&[Sym::Plus, Sym::Minus]);
        if self.sym() == Sym::Plus || self.sym() == Sym::Minus {
            let leading = self.sym();
            self.advance();
            self.term(nxt, lev)?;
            if leading == Sym::Minus {
                self.opr(Opr::Neg)?;
            }
        } else {
            self.term(nxt, lev)?;
        }
        while self.sym() == Sym::Plus || self.sym() == Sym::Minus {
            let addop = self.sym();
            self.advance();
            self.term(nxt, lev)?;
            if addop == Sym::Plus {
                self.opr(Opr::Add)?;
            } else {
                self.opr(Opr::Sub)?;
            }
        }
        Ok(())
    }

    // term := factor { ("*"|"/") factor }
    fn term(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        let nxt = fsys | SymSet::of(&[Sym::Times, Sym::Slash]);
        self.factor(nxt, lev)?;
        while self.sym() == Sym::Times || self.sym() == Sym::Slash {
            let mulop = self.sym();
            self.advance();
            self.factor(nxt, lev)?;
            if mulop == Sym::Times {
                self.opr(Opr::Mul)?;
            } else {
                self.opr(Opr::Div)?;
            }
        }
        Ok(())
    }

    // factor := ident | number | "(" expr ")"
    fn factor(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        self.test(self.fac_first, fsys, ErrorCode::ExpectedFactor);
        if !self.fac_first.has(self.sym()) {
            return Ok(());
        }
        match self.sym() {
            Sym::Ident => {
                match self.table.position(self.lex.id()) {
                    None => self.report(ErrorCode::UndeclaredIdent),
                    Some(index) => {
                        let item = self.table.get(index);
                        let (kind, level, adr, val) = (item.kind, item.level, item.adr, item.val);
                        match kind {
                            Kind::Constant => {
                                self.code.emit(Opcode::Lit, 0, Operand::Number(val))?;
                            }
                            Kind::Variable => {
                                let l = self.level_diff(lev, level)?;
                                self.code.emit(Opcode::Lod, l, Operand::Number(adr as i32))?;
                            }
                            Kind::Procedure => self.report(ErrorCode::ProcedureAsValue),
                            Kind::Text => self.report(ErrorCode::StringOperandInExpression),
                        }
                    }
                }
                self.advance();
            }
            Sym::Number => {
                if self.lex.num() > AMAX {
                    return Err(self.error(ErrorCode::NumberTooLarge));
                }
                let n = self.lex.num() as i32;
                self.code.emit(Opcode::Lit, 0, Operand::Number(n))?;
                self.advance();
            }
            Sym::LParen => {
                self.advance();
                let nxt = fsys | SymSet::of(&[Sym::RParen]);
                self.expression(nxt, lev)?;
                if self.sym() == Sym::RParen {
                    self.advance();
                } else {
                    self.report(ErrorCode::ExpectedFactorEndParen);
                }
            }
            _ => {
                self.test(fsys, self.fac_first, ErrorCode::UnexpectedFactor);
            }
        }
        Ok(())
    }

    // str-expr := str-term { "+" str-term }
    fn str_expression(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        let nxt = fsys | SymSet::of(&[Sym::Plus]);
        self.str_term(nxt, lev)?;
        while self.sym() == Sym::Plus {
            self.advance();
            self.str_term(nxt, lev)?;
            self.opr(Opr::Concat)?;
        }
        Ok(())
    }

    // str-term := str-factor { "*" factor }
    //
    // The repetition count is a numeric factor; string identifiers
    // and literals there are compile-time errors.
    fn str_term(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        let nxt = fsys | SymSet::of(&[Sym::Times]);
        self.str_factor(nxt, lev)?;
        while self.sym() == Sym::Times {
            self.advance();
            self.factor(nxt, lev)?;
            self.opr(Opr::Repeat)?;
        }
        Ok(())
    }

    // str-factor := ident | number | string-literal | "(" str-expr ")"
    //
    // A numeric literal here becomes the string literal of its
    // decimal rendering, so "a" + 5 is "a5".
    fn str_factor(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        self.test(self.fac_first, fsys, ErrorCode::ExpectedStringFactor);
        if !self.fac_first.has(self.sym()) {
            return Ok(());
        }
        match self.sym() {
            Sym::Ident => {
                match self.table.position(self.lex.id()) {
                    None => self.report(ErrorCode::UndeclaredStringIdent),
                    Some(index) => {
                        let item = self.table.get(index);
                        let (kind, level, adr) = (item.kind, item.level, item.adr);
                        match kind {
                            Kind::Variable => {
                                let l = self.level_diff(lev, level)?;
                                self.code.emit(Opcode::Lod, l, Operand::Number(adr as i32))?;
                            }
                            Kind::Text => {
                                let l = self.level_diff(lev, level)?;
                                self.code
                                    .emit(Opcode::Lods, l, Operand::Number(adr as i32))?;
                            }
                            Kind::Procedure => {
                                self.report(ErrorCode::ProcedureInStringExpression)
                            }
                            Kind::Constant => self.report(ErrorCode::NotAStringOperand),
                        }
                    }
                }
                self.advance();
            }
            Sym::Number => {
                if self.lex.num() > AMAX {
                    return Err(self.error(ErrorCode::StringNumberTooLarge));
                }
                let text = self.lex.num().to_string();
                self.code.emit(Opcode::Lits, 0, Operand::Text(text.into()))?;
                self.advance();
            }
            Sym::StringLit => {
                let text = self.lex.text().clone();
                self.code.emit(Opcode::Lits, 0, Operand::Text(text))?;
                self.advance();
            }
            Sym::LParen => {
                self.advance();
                let nxt = fsys | SymSet::of(&[Sym::RParen]);
                self.str_expression(nxt, lev)?;
                if self.sym() == Sym::RParen {
                    self.advance();
                } else {
                    self.report(ErrorCode::ExpectedStringEndParen);
                }
            }
            _ => {
                self.test(fsys, self.fac_first, ErrorCode::UnexpectedStringFactor);
            }
        }
        Ok(())
    }

    // cond := "odd" expr | expr relop expr
    fn condition(&mut self, fsys: SymSet, lev: usize) -> Result<()> {
        if self.sym() == Sym::Odd {
            self.advance();
            self.expression(fsys, lev)?;
            self.opr(Opr::Odd)?;
        } else {
            let nxt = fsys
                | SymSet::of(&[Sym::Eql, Sym::Neq, Sym::Lss, Sym::Leq, Sym::Gtr, Sym::Geq]);
            self.expression(nxt, lev)?;
            let relop = match self.sym() {
                Sym::Eql => Some(Opr::Eq),
                Sym::Neq => Some(Opr::NotEq),
                Sym::Lss => Some(Opr::Lt),
                Sym::Geq => Some(Opr::GtEq),
                Sym::Gtr => Some(Opr::Gt),
                Sym::Leq => Some(Opr::LtEq),
                _ => None,
            };
            match relop {
                Some(opr) => {
                    self.advance();
                    self.expression(fsys, lev)?;
                    self.opr(opr)?;
                }
                None => self.report(ErrorCode::ExpectedRelop),
            }
        }
        Ok(())
    }

    fn string_ident(&self) -> bool {
        self.lex.sym() == Sym::Ident
            && match self.table.position(self.lex.id()) {
                Some(index) => self.table.get(index).kind == Kind::Text,
                None => false,
            }
    }
}
