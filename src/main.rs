fn main() {
    pl0::term::main()
}
